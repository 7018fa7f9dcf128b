use std::cmp::Reverse;
use std::collections::HashMap;

use super::RuleEntry;

struct Node {
    children: HashMap<char, Node>,
    /// Indices into the entry list, best candidate first.
    rules: Vec<usize>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            rules: Vec::new(),
        }
    }

    fn sort_rules(&mut self, entries: &[RuleEntry]) {
        // Stable: equal priorities stay in declaration order.
        self.rules.sort_by_key(|&i| Reverse(entries[i].priority));
        for child in self.children.values_mut() {
            child.sort_rules(entries);
        }
    }
}

/// Character trie over rule patterns.
pub(crate) struct RuleTrie {
    root: Node,
    max_depth: usize,
}

impl RuleTrie {
    pub(crate) fn build(entries: &[RuleEntry]) -> Self {
        let mut root = Node::new();
        let mut max_depth = 0;
        for (idx, entry) in entries.iter().enumerate() {
            let mut node = &mut root;
            let mut depth = 0;
            for ch in entry.pattern.chars() {
                node = node.children.entry(ch).or_insert_with(Node::new);
                depth += 1;
            }
            node.rules.push(idx);
            max_depth = max_depth.max(depth);
        }
        root.sort_rules(entries);
        Self { root, max_depth }
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Walk from `cursor` and return `(entry index, matched length)` of the
    /// deepest node holding a rule whose context admits the span.
    pub(crate) fn longest_match(
        &self,
        entries: &[RuleEntry],
        chars: &[char],
        cursor: usize,
    ) -> Option<(usize, usize)> {
        let len = chars.len();
        let mut node = &self.root;
        let mut best = None;
        for (offset, ch) in chars.get(cursor..)?.iter().enumerate() {
            match node.children.get(ch) {
                Some(child) => node = child,
                None => break,
            }
            let end = cursor + offset + 1;
            if let Some(&idx) = node
                .rules
                .iter()
                .find(|&&i| entries[i].context.admits(cursor, end, len))
            {
                best = Some((idx, offset + 1));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Glyph, RuleContext};

    fn entry(pattern: &str, out: &str, context: RuleContext, priority: i32) -> RuleEntry {
        RuleEntry {
            pattern: pattern.to_string(),
            glyph: Glyph::Consonant(out.to_string()),
            context,
            priority,
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn prefers_longest_pattern() {
        let entries = vec![
            entry("d", "ඩ", RuleContext::Any, 0),
            entry("dh", "ද", RuleContext::Any, 0),
        ];
        let trie = RuleTrie::build(&entries);
        assert_eq!(trie.longest_match(&entries, &chars("dha"), 0), Some((1, 2)));
        assert_eq!(trie.longest_match(&entries, &chars("da"), 0), Some((0, 1)));
        assert_eq!(trie.max_depth(), 2);
    }

    #[test]
    fn falls_back_when_longer_path_has_no_rule() {
        // "zd" exists but "z" alone does not; "zq" must not match.
        let entries = vec![entry("zd", "ඬ", RuleContext::Any, 0)];
        let trie = RuleTrie::build(&entries);
        assert_eq!(trie.longest_match(&entries, &chars("zq"), 0), None);
    }

    #[test]
    fn priority_breaks_ties_then_declaration_order() {
        let entries = vec![
            entry("k", "first", RuleContext::Any, 0),
            entry("k", "second", RuleContext::Any, 5),
            entry("k", "third", RuleContext::Any, 5),
        ];
        let trie = RuleTrie::build(&entries);
        assert_eq!(trie.longest_match(&entries, &chars("k"), 0), Some((1, 1)));
    }

    #[test]
    fn context_filters_candidates() {
        let entries = vec![
            entry("n", "න", RuleContext::Any, 0),
            entry("ng", "ං", RuleContext::Final, 0),
        ];
        let trie = RuleTrie::build(&entries);
        // final position: "ng" admitted
        assert_eq!(trie.longest_match(&entries, &chars("hang"), 2), Some((1, 2)));
        // medial position: falls back to "n"
        assert_eq!(trie.longest_match(&entries, &chars("hanga"), 2), Some((0, 1)));
    }

    #[test]
    fn cursor_past_end_is_none() {
        let entries = vec![entry("k", "ක", RuleContext::Any, 0)];
        let trie = RuleTrie::build(&entries);
        assert_eq!(trie.longest_match(&entries, &chars("k"), 5), None);
    }
}
