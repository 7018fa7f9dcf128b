use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn rules_export() {
    print!("{}", singlish_core::rules::default_toml());
}

pub fn rules_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(singlish_core::rules::parse_rules_toml(&content), "Error: {}");
    println!(
        "OK: version {}, {} rules, longest pattern {}",
        table.version(),
        table.len(),
        table.max_pattern_len()
    );
}

pub fn settings_export() {
    print!("{}", singlish_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        singlish_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: classifier.min_acronym_len={}, composition.rakaransaya={}, controller.debounce_ms={}",
        s.classifier.min_acronym_len, s.composition.rakaransaya, s.controller.debounce_ms
    );
}
