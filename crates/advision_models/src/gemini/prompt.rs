//! Script prompt, system instruction, and response schema.

use advision_core::ProductBrief;
use serde_json::{Value, json};

/// Director persona and the six-beat advertising structure.
pub const SCRIPT_SYSTEM_INSTRUCTION: &str = "\
You are an award-winning TVC (Television Commercial) Director and Cinematographer.
Your task is to create a professional 6-frame storyboard sequence for a product.

The sequence must follow standard advertising logic:
1. Hook (Attention Grabber)
2. Problem/Need
3. Product Introduction (The Solution)
4. Benefit/Feature Demonstration (Key Visual)
5. Emotional Payoff/Lifestyle Connection
6. Call to Action / Logo Reveal

For each frame, you MUST provide:
- frame_number: The sequence order (1-6).
- shot_type: e.g., \"Wide Shot\", \"Extreme Close Up\", \"Dutch Angle\", \"Over the Shoulder\".
- action_description: The director's visual instructions.
- voiceover_script: The exact spoken words (VO) or audio description (e.g., \"Music swells\", \"Sound of engine roaring\").
- estimated_duration: The duration of the shot (e.g., \"2s\", \"1.5s\").
- visual_generation_prompt: A highly detailed, vivid image generation prompt suitable for an AI image generator.
  Include details about lighting (e.g., \"cinematic lighting\", \"golden hour\", \"volumetric fog\"),
  composition (e.g., \"rule of thirds\", \"symmetrical\", \"depth of field\"), camera type (e.g., \"Arri Alexa\", \"35mm lens\"),
  and color grading (e.g., \"teal and orange\", \"high contrast\").

Ensure the visual style is cohesive across all 6 frames.";

/// User turn carrying the brief.
pub fn script_prompt(brief: &ProductBrief) -> String {
    format!(
        "Product Name: {}\nProduct Description: {}\nDesired Tone: {}\n\n\
         Generate a 6-frame storyboard in JSON format with voiceover and timing.",
        brief.product_name(),
        brief.description(),
        brief.tone()
    )
}

/// Schema the script response must follow.
pub fn script_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "storyboard": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "frame_number": {"type": "INTEGER"},
                        "shot_type": {"type": "STRING"},
                        "action_description": {"type": "STRING"},
                        "visual_generation_prompt": {"type": "STRING"},
                        "voiceover_script": {"type": "STRING"},
                        "estimated_duration": {"type": "STRING"}
                    },
                    "required": [
                        "frame_number",
                        "shot_type",
                        "action_description",
                        "visual_generation_prompt",
                        "voiceover_script",
                        "estimated_duration"
                    ]
                }
            }
        },
        "required": ["storyboard"]
    })
}

/// Remove a surrounding markdown code fence, if the model added one.
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn prompt_carries_the_brief() {
        let brief = ProductBrief::builder()
            .product_name("AeroSynth Oil")
            .description("Reduces friction")
            .tone("Luxury")
            .build()
            .unwrap();
        let prompt = script_prompt(&brief);
        assert!(prompt.contains("Product Name: AeroSynth Oil"));
        assert!(prompt.contains("Desired Tone: Luxury"));
    }

    #[test]
    fn schema_requires_every_frame_field() {
        let schema = script_response_schema();
        let required = schema["properties"]["storyboard"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 6);
    }
}
