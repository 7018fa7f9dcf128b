use std::fs;
use std::io::{self, Read};
use std::process;
use std::sync::Arc;

use singlish_core::explain::format_text;
use singlish_core::rules::RuleTable;
use singlish_core::settings::parse_settings_toml;
use singlish_core::Engine;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Engine construction flags shared by every conversion subcommand.
#[derive(Debug, Default, Clone)]
pub struct EngineOptions {
    pub rules: Option<String>,
    pub settings: Option<String>,
    pub pin: Vec<String>,
}

pub fn build_engine(opts: &EngineOptions) -> Engine {
    let mut builder = Engine::builder();
    if let Some(ref path) = opts.rules {
        let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
        let rules = die!(RuleTable::from_toml(&content), "Error in {path}: {}");
        builder = builder.rules(Arc::new(rules));
    }
    if let Some(ref path) = opts.settings {
        let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
        let settings = die!(parse_settings_toml(&content), "Error in {path}: {}");
        builder = builder.settings(settings);
    }
    for word in &opts.pin {
        builder = builder.pin(word.clone());
    }
    builder.build()
}

/// Text from the argument, a file, or stdin, in that order of preference.
fn read_input(text: Option<&str>, file: Option<&str>) -> String {
    if let Some(text) = text {
        return text.to_string();
    }
    if let Some(path) = file {
        return die!(fs::read_to_string(path), "Error reading {path}: {}");
    }
    let mut buf = String::new();
    die!(io::stdin().read_to_string(&mut buf), "Error reading stdin: {}");
    buf
}

pub fn convert_cmd(text: Option<&str>, file: Option<&str>, opts: &EngineOptions) {
    let engine = build_engine(opts);
    let input = read_input(text, file);
    let output = engine.convert(&input);
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

pub fn explain_cmd(text: Option<&str>, file: Option<&str>, json: bool, opts: &EngineOptions) {
    let engine = build_engine(opts);
    let input = read_input(text, file);
    let result = engine.explain(&input);
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&result), "JSON serialization failed: {}")
        );
    } else {
        print!("{}", format_text(&result));
    }
}
