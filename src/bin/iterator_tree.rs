use pattern_catalog::{scenario, telemetry};

fn main() {
    telemetry::init();
    scenario::print_trace("Iterator Pattern (Binary Tree)", &scenario::iterator_tree());
}
