pub fn init() {
    // Facts go to stdout, so all diagnostics stay on stderr.
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .init();
}
