use ferret_graph::Observer;
use ferret_research::Stage;

/// Prints a banner per stage and the critic's routing decision.
#[derive(Debug, Default)]
pub struct ConsoleNarrator;

impl ConsoleNarrator {
    fn banner(stage: Stage) -> Option<&'static str> {
        match stage {
            Stage::Planning => Some("PLANNER: creating research plan"),
            Stage::Researching => Some("RESEARCHER: gathering information"),
            Stage::Critiquing => Some("CRITIC: evaluating research quality"),
            Stage::Writing => Some("WRITER: composing final report"),
            Stage::Done => None,
        }
    }
}

impl Observer for ConsoleNarrator {
    fn on_node_enter(&self, node: &str, step: usize) {
        if let Some(banner) = Stage::from_node(node).and_then(Self::banner) {
            println!("\n[{step}] {banner}");
        }
    }

    fn on_route(&self, from: &str, to: &str) {
        if Stage::from_node(from) != Some(Stage::Critiquing) {
            return;
        }
        match Stage::from_node(to) {
            Some(Stage::Planning) => println!("-> looping back for additional research"),
            Some(Stage::Writing) => println!("-> research approved, proceeding to writer"),
            _ => {}
        }
    }

    fn on_error(&self, node: &str, error: &str) {
        eprintln!("!! {node} failed: {error}");
    }
}
