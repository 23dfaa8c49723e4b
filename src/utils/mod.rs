pub mod build_info;

use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Output goes to stderr so it never
/// mixes with command output; `RUST_LOG` adds to the default directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "payoff=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    });
}
