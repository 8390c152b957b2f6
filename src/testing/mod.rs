#![cfg(test)]
crate::reexport!(marker);

use crate::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Parse with fixed options so tests never depend on the environment.
pub(crate) fn parse_test(text: &str) -> Statement {
    common_init();
    Statement::parse_with(text, &ParseOptions::default())
}

pub(crate) fn parse_traced(text: &str) -> Statement {
    common_init();
    let options = ParseOptions {
        trace: true,
        ..ParseOptions::default()
    };
    Statement::parse_with(text, &options)
}

pub(crate) fn codes(statement: &Statement) -> Vec<ErrorCode> {
    statement.diagnostics().iter().map(|d| d.code).collect()
}
