use tracing_wasm::WASMLayerConfigBuilder;

/// Routes `tracing` events to the browser console. Debug builds log
/// everything down to `DEBUG`.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(level)
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}
