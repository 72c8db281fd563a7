use crate::document::Document;
use crate::document::Selection;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Spread edges between the collected documents, used to reject fragment
/// cycles before any flattening happens.
pub(crate) struct FragmentGraph<'a> {
    documents: &'a BTreeMap<String, Document>,
}
impl<'a> FragmentGraph<'a> {
    pub(crate) fn new(documents: &'a BTreeMap<String, Document>) -> Self {
        Self { documents }
    }

    /// The first cycle reachable from `root`, rotated so it starts at its
    /// lexicographically smallest fragment and ending where it started.
    pub(crate) fn find_cycle(&self, root: &Document) -> Option<Vec<String>> {
        let mut path = vec![root.name().to_string()];
        let mut visiting = HashSet::from([root.name().to_string()]);
        let mut done = HashSet::new();
        self.check_selections(root.selections(), &mut path, &mut visiting, &mut done)
    }

    fn check_fragment(
        &self,
        fragment_name: &str,
        path: &mut Vec<String>,
        visiting: &mut HashSet<String>,
        done: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        if visiting.contains(fragment_name) {
            let start = path.iter().position(|name| name == fragment_name)?;
            let mut cycle = path[start..].to_vec();
            cycle.push(fragment_name.to_string());
            return Some(normalize_cycle(&cycle));
        }
        if done.contains(fragment_name) {
            return None;
        }
        // Unknown fragments are reported while flattening.
        let fragment = self.documents.get(fragment_name)?;

        path.push(fragment_name.to_string());
        visiting.insert(fragment_name.to_string());
        let cycle = self.check_selections(fragment.selections(), path, visiting, done);
        path.pop();
        visiting.remove(fragment_name);
        done.insert(fragment_name.to_string());
        cycle
    }

    fn check_selections(
        &self,
        selections: &[Selection],
        path: &mut Vec<String>,
        visiting: &mut HashSet<String>,
        done: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        for selection in selections {
            let cycle = match selection {
                Selection::FragmentSpread(spread) => {
                    self.check_fragment(spread.fragment_name(), path, visiting, done)
                },
                Selection::Field(_) | Selection::InlineFragment(_) => {
                    self.check_selections(selection.selections(), path, visiting, done)
                },
            };
            if cycle.is_some() {
                return cycle;
            }
        }
        None
    }
}

/// Rotates a closed cycle (`[B, C, A, B]`) to start with its smallest name
/// (`[A, B, C, A]`), so every phase of a cycle reports the same path.
pub(crate) fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    if cycle.is_empty() {
        return Vec::new();
    }

    let cycle_without_repeat = &cycle[..cycle.len() - 1];
    let min_idx = cycle_without_repeat
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&cycle_without_repeat[min_idx..]);
    normalized.extend_from_slice(&cycle_without_repeat[..min_idx]);
    if let Some(first) = normalized.first().cloned() {
        normalized.push(first);
    }
    normalized
}
