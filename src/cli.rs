//! CLI argument parsing with clap.

use clap::Parser;

/// Nail-art content studio: a Gemini-generated hero photo, pose variations
/// and a ready-to-post caption.
#[derive(Parser, Debug)]
#[command(name = "nailstudio", version, about)]
pub struct Cli {
    /// Text prompt describing the nail design. Enhanced automatically when empty.
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Reference image: a file path or a `data:` URL.
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Edit instruction applied to the master image; repeat to chain edits.
    #[arg(short, long = "edit", value_name = "INSTRUCTION")]
    pub edits: Vec<String>,

    /// Number of pose variations (1-10). Defaults to the config value.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Stop after the master image; no variations or caption.
    #[arg(long, conflicts_with = "enhance_only")]
    pub no_variations: bool,

    /// Only print the enhanced prompt.
    #[arg(long)]
    pub enhance_only: bool,

    /// Directory the images and caption are written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Output format: jpeg, png, webp. Defaults to the config value.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Text model name or alias (enhancement, caption).
    #[arg(long)]
    pub text_model: Option<String>,

    /// Image model name or alias.
    #[arg(short = 'm', long)]
    pub image_model: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the prompt from either the positional argument or the file flag.
    ///
    /// Neither being given yields an empty prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            Ok(std::fs::read_to_string(path)?.trim().to_string())
        } else {
            Ok(String::new())
        }
    }
}
