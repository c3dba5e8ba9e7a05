//! Init command implementation
//!
//! Writes a starter `pricewise.toml` and `.env.example`.

use super::output::Output;
use crate::utils::toml_config::{PricewiseConfig, DEFAULT_CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// pricewise.toml already exists
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// LLM provider to configure (gemini, openai or ollama)
    pub provider: String,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Pricewise");

    let provider = config.provider.to_lowercase();
    if !matches!(provider.as_str(), "gemini" | "openai" | "ollama") {
        let msg = format!(
            "Unknown provider '{}', expected gemini, openai or ollama",
            config.provider
        );
        output.error(&msg);
        return InitResult::Error(msg);
    }

    let base_path = &config.path;
    let config_path = base_path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !config.force {
        output.warning(&format!("{} already exists!", DEFAULT_CONFIG_FILE));
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::create_dir_all(base_path) {
        output.error(&format!("Failed to create {}: {}", base_path.display(), e));
        return InitResult::Error(e.to_string());
    }

    let toml_content = generate_pricewise_toml(&provider);
    // The template must stay loadable by the same parser the binary uses.
    if let Err(e) = PricewiseConfig::from_toml_str(&toml_content) {
        output.error(&format!("Generated configuration is invalid: {}", e));
        return InitResult::Error(e.to_string());
    }
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create {}: {}", DEFAULT_CONFIG_FILE, e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", DEFAULT_CONFIG_FILE);

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(&provider), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    output.complete("Pricewise initialized successfully!");

    output.header("Next Steps");
    output.newline();
    for (title, commands) in next_steps(&provider) {
        output.info(&title);
        for cmd in commands {
            output.command(cmd);
        }
    }

    InitResult::Success
}

/// Numbered follow-up steps; the Ollama server step only applies to ollama
fn next_steps(provider: &str) -> Vec<(String, Vec<&'static str>)> {
    let mut steps = vec![("Set up environment variables:", vec!["cp .env.example .env"])];
    if provider == "ollama" {
        steps.push((
            "Start Ollama (if not running):",
            vec!["ollama serve", "ollama pull llama3.2:3b"],
        ));
    }
    steps.push((
        "Research something:",
        vec!["pricewise research best budget 4K monitor"],
    ));

    steps
        .into_iter()
        .enumerate()
        .map(|(i, (title, commands))| (format!("{}. {}", i + 1, title), commands))
        .collect()
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_pricewise_toml(provider: &str) -> String {
    let llm_section = match provider {
        "openai" => {
            r#"# OpenAI-compatible chat completions (set OPENAI_API_KEY in .env)
[llm]
type = "openai"
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
temperature = 0.3
timeout_secs = 120
"#
        }
        "ollama" => {
            r#"# Ollama - local inference (no API key required)
[llm]
type = "ollama"
base_url = "http://localhost:11434"
model = "llama3.2:3b"
"#
        }
        _ => {
            r#"# Google Gemini (set GEMINI_API_KEY in .env)
[llm]
type = "gemini"
api_key_env = "GEMINI_API_KEY"
model = "gemini-2.0-flash-exp"
temperature = 0.3
timeout_secs = 120
"#
        }
    };

    format!(
        r#"# Pricewise configuration

[server]
host = "127.0.0.1"
port = 3000
log_level = "info"

{llm_section}
# Tavily web search (set TAVILY_API_KEY in .env)
[search]
api_key_env = "TAVILY_API_KEY"
api_base = "https://api.tavily.com"
max_results = 5
comparison_max_results = 3
depth = "advanced"
timeout_secs = 30

[output]
results_path = "research_results.json"
"#
    )
}

fn generate_env_example(provider: &str) -> String {
    let llm_key = match provider {
        "openai" => "OPENAI_API_KEY=sk-...\n",
        "ollama" => "",
        _ => "GEMINI_API_KEY=your-gemini-key\n",
    };
    format!(
        "# Copy to .env and fill in\n{}TAVILY_API_KEY=tvly-...\n# RUST_LOG=pricewise=debug\n",
        llm_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("gemini", "gemini")]
    #[case("openai", "openai")]
    #[case("ollama", "ollama")]
    fn test_templates_parse(#[case] provider: &str, #[case] kind: &str) {
        let config = PricewiseConfig::from_toml_str(&generate_pricewise_toml(provider)).unwrap();
        assert_eq!(config.llm.kind(), kind);
        assert_eq!(config.search.max_results, 5);
        config.validate().unwrap();
    }

    #[test]
    fn test_init_writes_files_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::no_color();
        let init = |force| InitConfig {
            path: dir.path().to_path_buf(),
            force,
            provider: "gemini".to_string(),
        };

        assert_eq!(run(init(false), &output), InitResult::Success);
        assert!(dir.path().join(DEFAULT_CONFIG_FILE).exists());
        assert!(dir.path().join(".env.example").exists());

        assert_eq!(run(init(false), &output), InitResult::AlreadyExists);
        assert_eq!(run(init(true), &output), InitResult::Success);
    }

    #[rstest]
    #[case("gemini", 2)]
    #[case("openai", 2)]
    #[case("ollama", 3)]
    fn test_next_steps_numbered_without_gaps(#[case] provider: &str, #[case] count: usize) {
        let steps = next_steps(provider);
        assert_eq!(steps.len(), count);
        for (i, (title, _)) in steps.iter().enumerate() {
            assert!(title.starts_with(&format!("{}. ", i + 1)), "bad title {}", title);
        }
        assert_eq!(
            steps.last().map(|(title, _)| title.as_str()),
            Some(format!("{}. Research something:", count).as_str())
        );
    }

    #[test]
    fn test_init_rejects_unknown_provider() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            InitConfig {
                path: dir.path().to_path_buf(),
                force: false,
                provider: "anthropic".to_string(),
            },
            &Output::no_color(),
        );
        assert!(matches!(result, InitResult::Error(_)));
        assert!(!dir.path().join(DEFAULT_CONFIG_FILE).exists());
    }
}
