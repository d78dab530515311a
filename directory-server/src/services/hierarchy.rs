//! Reporting hierarchy builder
//!
//! Turns the flat employee list into a forest in one pass over the
//! adjacency lists. Guarantees every employee appears exactly once:
//! - `reportsTo` absent, dangling or pointing at itself => root
//! - members of a cycle unreachable from any root => first one in load
//!   order is promoted to root

use std::collections::HashMap;

use shared::models::{EmployeeNode, EmployeeResponse};

/// Build the reporting forest. Roots and children keep input order.
pub fn build_forest(employees: Vec<EmployeeResponse>) -> Vec<EmployeeNode> {
    let index: HashMap<&str, usize> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();

    let parent: Vec<Option<usize>> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| {
            e.reports_to
                .as_deref()
                .and_then(|m| index.get(m).copied())
                .filter(|&p| p != i)
        })
        .collect();
    drop(index);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); employees.len()];
    let mut roots = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<EmployeeResponse>> = employees.into_iter().map(Some).collect();
    let mut visited = vec![false; slots.len()];
    let mut forest = Vec::with_capacity(roots.len());

    for root in roots {
        forest.push(assemble(root, &children, &mut slots, &mut visited));
    }

    for i in 0..slots.len() {
        if !visited[i] {
            if let Some(e) = &slots[i] {
                tracing::warn!(employee_id = %e.id, "reportsTo cycle detected, promoting to root");
            }
            forest.push(assemble(i, &children, &mut slots, &mut visited));
        }
    }

    forest
}

/// Assemble the subtree under `root` without recursion.
///
/// Depth-first with an explicit stack; a node is built once all of its
/// children are done (post-order), so chain length never touches the
/// thread stack.
fn assemble(
    root: usize,
    children: &[Vec<usize>],
    slots: &mut [Option<EmployeeResponse>],
    visited: &mut [bool],
) -> EmployeeNode {
    // (node, next child cursor, finished children)
    let mut stack: Vec<(usize, usize, Vec<EmployeeNode>)> = vec![(root, 0, Vec::new())];
    visited[root] = true;

    loop {
        let Some(top) = stack.last_mut() else {
            unreachable!("stack holds at least the root until it is built");
        };
        let (i, cursor, _) = top;

        if let Some(&c) = children[*i].get(*cursor) {
            *cursor += 1;
            if !visited[c] {
                visited[c] = true;
                stack.push((c, 0, Vec::new()));
            }
            continue;
        }

        let Some((i, _, built)) = stack.pop() else {
            unreachable!("checked non-empty above");
        };
        let employee = slots[i]
            .take()
            .unwrap_or_else(|| unreachable!("employee assembled twice"));
        let node = EmployeeNode {
            employee,
            children: built,
        };

        match stack.last_mut() {
            Some((_, _, siblings)) => siblings.push(node),
            None => return node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp(id: &str, reports_to: Option<&str>) -> EmployeeResponse {
        EmployeeResponse {
            id: format!("employee:{id}"),
            name: id.to_string(),
            description: None,
            email: format!("{id}@example.com"),
            phone: None,
            reports_to: reports_to.map(|m| format!("employee:{m}")),
            image: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids(nodes: &[EmployeeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.employee.id.as_str()).collect()
    }

    fn total(nodes: &[EmployeeNode]) -> usize {
        let mut count = 0;
        let mut pending: Vec<&EmployeeNode> = nodes.iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    #[test]
    fn empty_input_gives_empty_forest() {
        assert!(build_forest(Vec::new()).is_empty());
    }

    #[test]
    fn nests_reports_under_managers() {
        let forest = build_forest(vec![
            emp("ceo", None),
            emp("cto", Some("ceo")),
            emp("dev1", Some("cto")),
            emp("dev2", Some("cto")),
            emp("cfo", Some("ceo")),
        ]);

        assert_eq!(ids(&forest), vec!["employee:ceo"]);
        let ceo = &forest[0];
        assert_eq!(ids(&ceo.children), vec!["employee:cto", "employee:cfo"]);
        assert_eq!(
            ids(&ceo.children[0].children),
            vec!["employee:dev1", "employee:dev2"]
        );
        assert!(ceo.children[1].children.is_empty());
        assert_eq!(total(&forest), 5);
    }

    #[test]
    fn child_listed_before_manager_still_nests() {
        let forest = build_forest(vec![emp("dev", Some("lead")), emp("lead", None)]);
        assert_eq!(ids(&forest), vec!["employee:lead"]);
        assert_eq!(ids(&forest[0].children), vec!["employee:dev"]);
    }

    #[test]
    fn multiple_roots_and_dangling_manager() {
        let forest = build_forest(vec![
            emp("a", None),
            emp("b", Some("ghost")),
            emp("c", None),
        ]);
        assert_eq!(ids(&forest), vec!["employee:a", "employee:b", "employee:c"]);
        assert_eq!(total(&forest), 3);
    }

    #[test]
    fn self_reference_is_root() {
        let forest = build_forest(vec![emp("narcissus", Some("narcissus"))]);
        assert_eq!(ids(&forest), vec!["employee:narcissus"]);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn cycle_is_broken_and_every_member_kept() {
        let forest = build_forest(vec![
            emp("root", None),
            emp("x", Some("z")),
            emp("y", Some("x")),
            emp("z", Some("y")),
        ]);

        assert_eq!(ids(&forest), vec!["employee:root", "employee:x"]);
        let x = &forest[1];
        assert_eq!(ids(&x.children), vec!["employee:y"]);
        assert_eq!(ids(&x.children[0].children), vec!["employee:z"]);
        assert!(x.children[0].children[0].children.is_empty());
        assert_eq!(total(&forest), 4);
    }

    #[test]
    fn deep_chain_does_not_exhaust_stack() {
        const DEPTH: usize = 10_000;
        let mut employees = vec![emp("e0", None)];
        for i in 1..DEPTH {
            let manager = format!("e{}", i - 1);
            employees.push(emp(&format!("e{i}"), Some(&manager)));
        }

        let forest = build_forest(employees);
        assert_eq!(ids(&forest), vec!["employee:e0"]);
        assert_eq!(total(&forest), DEPTH);

        let mut depth = 1;
        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            assert_eq!(node.children.len(), 1);
            depth += 1;
            node = child;
        }
        assert_eq!(node.employee.id, format!("employee:e{}", DEPTH - 1));
        assert_eq!(depth, DEPTH);
    }
}
