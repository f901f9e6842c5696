//! Test utilities for storyboard tests.
//!
//! Mock script and image generators plus a canned six-frame script.

use advision_core::{ProductBrief, ScriptEntry, ScriptResult};

pub mod mock_generators;

#[allow(unused_imports)]
pub use mock_generators::{
    MockHook, MockImageBehavior, MockImageGenerator, MockScriptBehavior, MockScriptGenerator,
};

/// Brief for the AeroSynth Oil scenario.
#[allow(dead_code)]
pub fn aerosynth_brief() -> ProductBrief {
    ProductBrief::builder()
        .product_name("AeroSynth Oil")
        .description("High-performance di-ester base engine oil. Reduces friction by 40%.")
        .build()
        .expect("Valid brief")
}

/// A well-formed six-frame script; frame N uses the prompt "prompt N".
#[allow(dead_code)]
pub fn six_frame_script() -> ScriptResult {
    let shots = [
        "Extreme Close Up",
        "Wide Shot",
        "Dutch Angle",
        "Macro",
        "Over the Shoulder",
        "Logo Lockup",
    ];
    let entries = shots
        .iter()
        .enumerate()
        .map(|(index, shot)| {
            let number = index as i64 + 1;
            ScriptEntry::builder()
                .frame_number(number)
                .shot_type(*shot)
                .action_description(format!("Action for frame {}", number))
                .visual_generation_prompt(format!("prompt {}", number))
                .voiceover_script(format!("Voiceover {}", number))
                .estimated_duration("2s")
                .build()
                .expect("Valid script entry")
        })
        .collect();
    ScriptResult::new(entries)
}
