//! # Golden Path Walkthrough
//!
//! Sound pool of 3, no growth:
//!
//! Acquire ×3 → 4th is skipped → one sound finishes → next sound reuses the
//! freed instance → effects spawn per kind → menu shows 5 saves, then 2.
//!
//! Prints the pool state after each step and exits non-zero if any step
//! misbehaves.

use std::process::ExitCode;

use reservoir::{SaveSummary, Services, ServicesConfig, ServicesResult};

const CONFIG: &str = r#"
[sound_effects]
initial_size = 3
grow_on_starvation = false

[visual_effects]
pool_size_per_key = 2

[save_slots]
initial_size = 3
"#;

fn check(step: &str, ok: bool) -> bool {
    println!("  [{}] {}", if ok { "OK" } else { "FAIL" }, step);
    ok
}

fn saves(count: u32) -> Vec<SaveSummary> {
    (1..=count)
        .map(|slot| SaveSummary {
            slot,
            title: format!("Chapter {slot}"),
            play_time_minutes: slot * 47,
        })
        .collect()
}

fn run() -> ServicesResult<bool> {
    let mut services = Services::new(ServicesConfig::from_toml_str(CONFIG)?);
    services.initialize()?;
    let mut all_ok = true;

    println!("Sound effects:");
    for clip in ["shot_a", "shot_b", "shot_c"] {
        all_ok &= check(&format!("play {clip}"), services.play_sound(clip, 1.0, 0.5));
    }
    all_ok &= check("4th sound skipped while starved", !services.play_sound("shot_d", 1.0, 0.5));

    // Let the first sound finish early.
    if let Some(first) = services.sound_effects.objects_in_use_mut().next() {
        first.tick(1.0);
    }
    all_ok &= check("a finished sound frees its instance", services.sounds_playing() == 2);
    all_ok &= check("next sound reuses it", services.play_sound("shot_e", 1.0, 0.5));
    let clips: Vec<&str> = services.playing_clips().collect();
    println!("  playing: {clips:?}");
    all_ok &= check("exactly three sounds in use", clips == ["shot_e", "shot_b", "shot_c"]);
    all_ok &= check("the pool never grew", services.sound_effects.stats().total == 3);

    println!("Visual effects:");
    all_ok &= check("spawn spark", services.spawn_effect("spark", [0.0, 1.0, 0.0]));
    all_ok &= check("spawn smoke", services.spawn_effect("smoke", [2.0, 0.0, 0.0]));
    all_ok &= check("unknown kind rejected", !services.spawn_effect("confetti", [0.0; 3]));
    services.tick(0.5);
    all_ok &= check("spark burned out, smoke still up", services.visual_effects.objects_in_use().count() == 1);

    println!("Save slots:");
    all_ok &= check("five rows", services.show_save_slots(&saves(5)) == 5);
    all_ok &= check("pool grew to fit", services.save_slots.count_all_objects() == 5);
    all_ok &= check("two rows", services.show_save_slots(&saves(2)) == 2);
    let labels: Vec<&str> = services
        .save_slots
        .pool()
        .objects_in_use()
        .map(reservoir::SaveSlotRow::label)
        .collect();
    println!("  rows: {labels:?}");
    all_ok &= check("rows 0 and 1 visible only", labels.len() == 2);

    services.stop_all_effects();
    all_ok &= check("stop all effects", !services.any_effect_playing());

    Ok(all_ok)
}

fn main() -> ExitCode {
    println!("RESERVOIR golden path");
    match run() {
        Ok(true) => {
            println!("All steps passed.");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("Some steps failed.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Setup failed: {err}");
            ExitCode::FAILURE
        }
    }
}
