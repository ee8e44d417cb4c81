use crate::windy_error::MyResult;

/// Installs the `color_eyre` report handler and a `tracing` subscriber that
/// prints file, line and level.
pub fn init() -> MyResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();
    Ok(())
}
