//! Opt-in diagnostics for attachment-order defects
//!
//! The solver resolves elements in declaration order and never reorders:
//! an edge targeting an element declared later silently reads stale
//! zeroed bounds, and an id that matches nothing falls back to the
//! container. Both are legal but are a likely source of hard-to-debug
//! layouts, so this module surfaces them without changing resolution
//! order.

use std::collections::HashMap;
use std::fmt;

use crate::constraint::Target;
use crate::descriptor::{ElementDescriptor, GuideDescriptor};
use crate::error::LayoutError;
use crate::holder::{build_holders, ElementHolder, GuideHolder};

/// Category of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintKind {
    /// An edge targets an element declared later
    ForwardReference,
    /// An edge's ids match no element or guide; the solver will fall
    /// back to the container
    UnknownTarget,
    /// The attachment graph contains a cycle
    Cycle,
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForwardReference => f.write_str("forward-reference"),
            Self::UnknownTarget => f.write_str("unknown-target"),
            Self::Cycle => f.write_str("cycle"),
        }
    }
}

/// A diagnostic about one attachment defect
#[derive(Debug, Clone)]
pub struct LintWarning {
    pub kind: LintKind,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

enum Finding {
    Forward {
        id: String,
        attribute: &'static str,
        target: String,
    },
    Unknown {
        id: String,
        attribute: &'static str,
        target: Target,
    },
    Cycle {
        cycle: Vec<String>,
    },
}

impl Finding {
    fn into_warning(self) -> LintWarning {
        match self {
            Self::Forward { id, attribute, target } => LintWarning {
                kind: LintKind::ForwardReference,
                message: format!("element '{id}': '{attribute}' targets '{target}' which is declared later"),
            },
            Self::Unknown { id, attribute, target } => {
                let ids = target.candidate_ids().join("', '");
                LintWarning {
                    kind: LintKind::UnknownTarget,
                    message: format!(
                        "element '{id}': '{attribute}' targets '{ids}' which matches nothing; the container is used instead"
                    ),
                }
            }
            Self::Cycle { cycle } => LintWarning {
                kind: LintKind::Cycle,
                message: format!("circular constraint dependency: {}", cycle.join(" -> ")),
            },
        }
    }
}

/// Check a descriptor set for attachment defects. Validation errors from
/// holder construction (duplicate ids, conflicting edges, ...) are
/// returned as errors; defects the solver would tolerate come back as
/// warnings.
pub fn check(
    elements: &[ElementDescriptor],
    guides: &[GuideDescriptor],
    viewport_width: f64,
) -> Result<Vec<LintWarning>, LayoutError> {
    let (element_holders, guide_holders) = build_holders(elements, guides, viewport_width)?;
    Ok(findings(&element_holders, &guide_holders)
        .into_iter()
        .map(Finding::into_warning)
        .collect())
}

/// Strict mode used by the solver: promote the first forward reference
/// or cycle to a hard error
pub(crate) fn enforce(
    elements: &[ElementHolder],
    guides: &[GuideHolder],
) -> Result<(), LayoutError> {
    for finding in findings(elements, guides) {
        match finding {
            Finding::Forward { id, attribute, target } => {
                return Err(LayoutError::ForwardReference { id, attribute, target });
            }
            Finding::Cycle { cycle } => {
                return Err(LayoutError::CircularConstraint { cycle });
            }
            Finding::Unknown { .. } => {}
        }
    }
    Ok(())
}

fn findings(elements: &[ElementHolder], guides: &[GuideHolder]) -> Vec<Finding> {
    let element_index: HashMap<&str, usize> = elements
        .iter()
        .enumerate()
        .map(|(i, h)| (h.id.as_str(), i))
        .collect();

    let mut findings = Vec::new();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); elements.len()];

    for (index, holder) in elements.iter().enumerate() {
        for edge in &holder.edges {
            if edge.target == Target::Parent {
                continue;
            }

            // The first candidate id that matches a holder wins, exactly
            // as in the solver's target search
            let resolved = edge.target.candidate_ids().iter().find_map(|id| {
                if let Some(&target_index) = element_index.get(id.as_str()) {
                    Some((Some(target_index), id))
                } else if guides.iter().any(|g| g.id == *id) {
                    Some((None, id))
                } else {
                    None
                }
            });

            match resolved {
                Some((Some(target_index), id)) => {
                    adjacency[index].push(target_index);
                    if target_index > index {
                        findings.push(Finding::Forward {
                            id: holder.id.clone(),
                            attribute: edge.kind.attribute(),
                            target: id.clone(),
                        });
                    }
                }
                Some((None, _)) => {
                    // Guides resolve before any element; never stale
                }
                None => findings.push(Finding::Unknown {
                    id: holder.id.clone(),
                    attribute: edge.kind.attribute(),
                    target: edge.target.clone(),
                }),
            }
        }
    }

    if let Some(cycle) = find_cycle(&adjacency, elements) {
        findings.push(Finding::Cycle { cycle });
    }

    findings
}

/// Depth-first search for a cycle in the attachment graph, returning the
/// ids along the first cycle found
fn find_cycle(adjacency: &[Vec<usize>], elements: &[ElementHolder]) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(
        node: usize,
        adjacency: &[Vec<usize>],
        states: &mut [State],
        stack: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        states[node] = State::InProgress;
        stack.push(node);

        for &next in &adjacency[node] {
            match states[next] {
                State::InProgress => {
                    let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                    let mut cycle: Vec<usize> = stack[start..].to_vec();
                    cycle.push(next);
                    return Some(cycle);
                }
                State::Unvisited => {
                    if let Some(cycle) = visit(next, adjacency, states, stack) {
                        return Some(cycle);
                    }
                }
                State::Done => {}
            }
        }

        stack.pop();
        states[node] = State::Done;
        None
    }

    let mut states = vec![State::Unvisited; adjacency.len()];
    let mut stack = Vec::new();

    for node in 0..adjacency.len() {
        if states[node] == State::Unvisited {
            if let Some(cycle) = visit(node, adjacency, &mut states, &mut stack) {
                return Some(
                    cycle
                        .into_iter()
                        .map(|i| elements[i].id.clone())
                        .collect(),
                );
            }
        }
    }
    None
}
