//! `jarvis route`: explain the routing decision for a message.

use jarvis_providers::{BackendKind, build_from_config};

use super::{CliResult, load_config};

pub fn run(message: &str, fast: bool) -> CliResult {
    let config = load_config()?;
    let router = build_from_config(&config);

    let (backend, reason) = router.route(message, fast);
    let backend_config = match backend {
        BackendKind::Fast => &config.backends.fast,
        BackendKind::Capable => &config.backends.capable,
    };

    println!("  Backend:  {backend} ({} / {})", backend_config.name, backend_config.model);
    println!("  Reason:   {reason}");
    if !router.has_capable() {
        println!("  Note:     capable backend disabled, every call goes to the fast backend");
    }
    Ok(())
}
