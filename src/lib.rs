//! Error-tolerant analysis of `CREATE VIEW` DDL for editor tooling.
//!
//! [`Statement::parse`] turns possibly incomplete text into a structured
//! statement plus ordered [`Diagnostic`]s, and [`Statement::context_at`]
//! tells a completion engine which part of the statement the cursor is in.
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(cursor);
reexport!(sql);
reexport!(diagnostics);
reexport!(statement);
reexport!(context);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
