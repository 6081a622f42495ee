use std::io::Write as _;

use agent_runtime_client::InvokeError;
use agent_runtime_client::render::RULE_WIDTH;

/// One full-width `=` rule line.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Prints a rule-delimited section header and flushes.
pub fn section(title: &str) {
    println!("\n{}", rule());
    println!("{title}");
    println!("{}", rule());
    flush();
}

/// Prints the single top-level failure banner: error kind, message, and the
/// structured detail, then flushes. Callers return normally afterwards; a
/// failed invocation is a reported outcome, not a crash.
pub fn failure(err: &InvokeError) {
    section("Invocation failed");
    println!("kind:    {}", err.kind());
    println!("message: {err}");
    println!("detail:  {err:?}");
    println!("{}\n", rule());
    flush();
}

fn flush() {
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_spans_the_banner_width() {
        assert_eq!(rule().len(), RULE_WIDTH);
        assert!(rule().chars().all(|c| c == '='));
    }
}
