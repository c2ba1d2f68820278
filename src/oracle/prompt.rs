//! Prompt construction for naming-pattern inference.

use std::fmt::Write as _;

use super::types::{ChatMessage, ChatRequest, ResponseFormat};
use crate::core::config::InferenceConfig;
use crate::core::files::FileRecord;
use crate::rename::types::Example;

/// System message sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that analyses file naming patterns. \
Given original file names and a few renaming examples, identify the naming pattern and apply \
it to every file.";

/// Output contract appended to every prompt
const OUTPUT_CONTRACT: &str = r#"Return format: JSON only. Return one object per file to process, each with the original file name (original_name) and the new file name (new_name), collected in a JSON array.
Example of the expected format:
[
  {"original_name": "file1.txt", "new_name": "renamed_file1.txt"},
  {"original_name": "file2.txt", "new_name": "renamed_file2.txt"}
]"#;

/// Build the user prompt for `files` and `examples`.
pub fn build_prompt(files: &[FileRecord], examples: &[Example]) -> String {
    let mut prompt = String::new();
    prompt.push_str("I need you to work out a file renaming pattern and apply it to a set of files.\n\n");

    prompt.push_str("## Naming examples:\n");
    for example in examples {
        let _ = writeln!(prompt, "Original name: {}", example.original_name);
        let _ = writeln!(prompt, "New name: {}\n", example.new_name);
    }

    prompt.push_str("## Files to process:\n");
    for file in files {
        let _ = writeln!(prompt, "- {}", file.name);
    }

    prompt.push_str(
        "\nInfer the transformation from the examples alone and apply the same pattern uniformly \
         to every file listed above. For each file, give the name it should be renamed to.\n",
    );
    prompt.push_str(OUTPUT_CONTRACT);
    prompt.push('\n');
    prompt
}

/// Wrap a prompt into a complete chat request using `config`.
pub fn build_request(config: &InferenceConfig, prompt: String) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
        temperature: config.temperature,
        response_format: ResponseFormat::json_object(),
    }
}
