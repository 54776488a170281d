//! Command parameter words
//!
//! Callers pass parameters in the forms they read in router docs; this
//! module turns them into wire words:
//!
//! | caller passes   | wire word        |
//! |-----------------|------------------|
//! | `name=value`    | `=name=value`    |
//! | `=name=value`   | `=name=value`    |
//! | `?name=value`   | `?name=value`    |
//! | `.id=*1`        | `=.id=*1`        |

/// Turn one caller parameter into its wire word
pub fn normalize_param(param: &str) -> String {
    match param.as_bytes().first() {
        Some(b'=') | Some(b'?') => param.to_string(),
        _ => format!("={}", param),
    }
}

/// Build the full request sentence for a command
pub fn command_words(path: &str, params: &[&str]) -> Vec<String> {
    let mut words = Vec::with_capacity(params.len() + 1);
    words.push(path.to_string());
    words.extend(params.iter().map(|p| normalize_param(p)));
    words
}
