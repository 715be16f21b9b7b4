use super::*;

impl Proportion {
    fn percentage(self) -> String {
        format!("{self} = {:.1}% \u{b1} {:.1}%", 100.0 * self.ratio(), 200.0 * self.sd())
    }
}

impl<G: Game> NodeData<G> {
    fn describe(&self, children: usize) -> String {
        let action = self.action.map_or_else(|| "root".to_string(), |a| format!("{a:?}"));
        format!(
            "{action} [{}] children={children} untried={} depth={}",
            self.prop.percentage(),
            self.untried.len(),
            self.depth
        )
    }
}

impl<G: Game, S: SelectionPolicy<G>> MCTS<G, S> {
    /// Indented description of the subtree under `token`, at most `max_depth` levels deep.
    ///
    /// Children are ordered by their ratio for the side to move. Visited children with fewer
    /// than `min_n` visits, except the best one, are folded into a single summary line.
    pub fn render_tree(&self, token: Token, max_depth: u8, min_n: u32) -> Vec<String> {
        let mut lines = vec![];
        self.render_node(token, 0, max_depth, min_n, &mut lines);
        lines
    }

    fn render_node(&self, token: Token, depth: u8, max_depth: u8, min_n: u32, lines: &mut Vec<String>) {
        let Some(node) = self.tree.get(token) else {
            return;
        };
        let indent = "  ".repeat(depth as usize);
        let mut children: SmallVec<[_; 8]> = node.children(&self.tree).collect();
        lines.push(format!("{indent}{}", node.data.describe(children.len())));
        if depth >= max_depth {
            return;
        }

        let is_maximize = node.data.is_maximize(self.maximize_player);
        children.sort_by(|a, b| b.data.ratio(is_maximize).total_cmp(&a.data.ratio(is_maximize)));
        let mut folded = Proportion::default();
        let mut folded_count = 0;
        for (i, child) in children.into_iter().enumerate() {
            let n = child.data.prop.n;
            if n == 0 {
                continue;
            }
            if i == 0 || n >= min_n {
                self.render_node(child.token(), depth + 1, max_depth, min_n, lines);
            } else {
                folded += child.data.prop;
                folded_count += 1;
            }
        }
        if folded_count > 0 {
            lines.push(format!("{indent}  ... {folded_count} more [{}]", folded.percentage()));
        }
    }

    pub fn print_tree(&self, token: Token, max_depth: u8, min_n: u32) {
        for line in self.render_tree(token, max_depth, min_n) {
            debug!("{line}");
        }
    }
}
