use pattern_catalog::{scenario, telemetry};

fn main() {
    telemetry::init();
    scenario::print_trace("Command Pattern", &scenario::command_editor());
}
