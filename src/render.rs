//! Plain-text rendering of the step overview and the problem tree.

use crate::models::{ProblemTree, TreeNode, TreeNodeKind};
use crate::steps::{StepStatus, StepView};

const COMPLETED: char = '●';
const CURRENT: char = '◆';
const UPCOMING: char = '○';

/// Placeholder trunk for a tree whose core problem is still empty.
const NO_CORE_PROBLEM: &str = "(core problem not set)";

fn status_symbol(status: StepStatus) -> char {
    match status {
        StepStatus::Completed => COMPLETED,
        StepStatus::Current => CURRENT,
        StepStatus::Upcoming => UPCOMING,
    }
}

/// Render the session overview, one numbered step per line.
///
/// Example output:
/// ```text
/// ● 1. Manage Expectations
/// ◆ 2. Problem Tree
/// ○ 3. Empathy Map
/// ```
pub fn render_overview(views: &[StepView]) -> String {
    let mut output = String::new();
    for view in views {
        output.push(status_symbol(view.status));
        output.push(' ');
        output.push_str(&format!("{}. {}", view.step.index + 1, view.step.name));
        output.push('\n');
    }
    output
}

/// Render a problem tree with the core problem as the trunk, effects above
/// and causes below.
///
/// Example output:
/// ```text
/// Users abandon checkout
/// ├── Effects
/// │   └── Lost revenue
/// └── Causes
///     ├── Slow page load
///     └── Too many form fields
/// ```
pub fn render_problem_tree(tree: &ProblemTree) -> String {
    let mut output = String::new();
    let trunk = tree.core_problem.trim();
    output.push_str(if trunk.is_empty() { NO_CORE_PROBLEM } else { trunk });
    output.push('\n');

    let branches = [("Effects", TreeNodeKind::Effect), ("Causes", TreeNodeKind::Cause)];
    for (i, (label, kind)) in branches.iter().enumerate() {
        let is_last = i == branches.len() - 1;
        let nodes: Vec<&TreeNode> = tree.items.iter().filter(|n| n.kind == *kind).collect();
        render_branch(&mut output, label, &nodes, is_last);
    }
    output
}

fn render_branch(output: &mut String, label: &str, nodes: &[&TreeNode], is_last: bool) {
    output.push_str(if is_last { "└── " } else { "├── " });
    output.push_str(label);
    output.push('\n');

    let prefix = if is_last { "    " } else { "│   " };
    for (i, node) in nodes.iter().enumerate() {
        let branch = if i == nodes.len() - 1 { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push_str(&node.text);
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;
    use crate::steps::StepSequencer;

    fn node(id: &str, text: &str, kind: TreeNodeKind) -> TreeNode {
        TreeNode {
            id: ItemId::from(id),
            text: text.to_string(),
            kind,
        }
    }

    #[test]
    fn test_overview_marks_progress() {
        let output = render_overview(&StepSequencer.overview(1));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("● 1. "));
        assert!(lines[1].starts_with("◆ 2. "));
        assert!(lines[5].starts_with("○ 6. "));
    }

    #[test]
    fn test_empty_tree() {
        let output = render_problem_tree(&ProblemTree::default());
        assert_eq!(output, "(core problem not set)\n├── Effects\n└── Causes\n");
    }

    #[test]
    fn test_tree_with_both_sides() {
        let tree = ProblemTree {
            core_problem: "Users abandon checkout".to_string(),
            items: vec![
                node("c1", "Slow page load", TreeNodeKind::Cause),
                node("e1", "Lost revenue", TreeNodeKind::Effect),
                node("c2", "Too many form fields", TreeNodeKind::Cause),
            ],
        };
        let expected = "Users abandon checkout\n├── Effects\n│   └── Lost revenue\n└── Causes\n    ├── Slow page load\n    └── Too many form fields\n";
        assert_eq!(render_problem_tree(&tree), expected);
    }
}
