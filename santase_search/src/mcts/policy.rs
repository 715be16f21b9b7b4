use super::*;

pub struct SelectionPolicyContext<'a, 'b, G: Game> {
    pub config: &'a MCTSConfig,
    pub parent: &'b NodeData<G>,
    pub is_maximize: bool,
}

/// Trait for customizing the MCTS selection policy.
/// In the selection phase of MCTS, the child with the highest (ratio + uct)
/// is selected, where ratio is the mean reward of the child for the side to move
/// and uct is a factor to encourage children with fewer visits to be selected.
///
/// See also: <https://en.wikipedia.org/wiki/Monte_Carlo_tree_search#Exploration_and_exploitation>
pub trait SelectionPolicy<G: Game>: Send + Sync {
    /// Exploration term of a child. Unvisited children return infinity.
    fn uct_child(&self, ctx: &SelectionPolicyContext<G>, child: &NodeData<G>) -> f32;

    #[inline]
    fn score(&self, ctx: &SelectionPolicyContext<G>, child: &NodeData<G>) -> f32 {
        child.ratio(ctx.is_maximize) + self.uct_child(ctx, child)
    }
}

/// `C * sqrt(ln(N_parent) / N_child)`
#[derive(Debug, Default, Copy, Clone)]
pub struct UCB1;

impl<G: Game> SelectionPolicy<G> for UCB1 {
    fn uct_child(&self, ctx: &SelectionPolicyContext<G>, child: &NodeData<G>) -> f32 {
        let n_child = child.prop.n;
        if n_child == 0 {
            return f32::INFINITY;
        }
        let n_parent = ctx.parent.prop.n.max(1) as f32;
        ctx.config.exploration * (n_parent.ln() / n_child as f32).sqrt()
    }
}

/// Exploitation only.
#[derive(Debug, Default, Copy, Clone)]
pub struct Greedy;

impl<G: Game> SelectionPolicy<G> for Greedy {
    fn uct_child(&self, _: &SelectionPolicyContext<G>, child: &NodeData<G>) -> f32 {
        if child.prop.n == 0 {
            f32::INFINITY
        } else {
            0.0
        }
    }
}
