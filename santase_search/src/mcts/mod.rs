use instant::Instant;
use log::{debug, warn};

use crate::{Game, GameTreeSearch, SearchCounter, SearchResult};
use atree::{Arena, Token};
use santase_sim::{
    prelude::PlayerId,
    rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng},
    smallvec::SmallVec,
};

use self::policy::{SelectionPolicy, SelectionPolicyContext, UCB1};

pub mod policy;

pub mod proportion;
use proportion::*;

pub mod debug;
pub use debug::*;

#[derive(Debug, Clone)]
pub struct NodeData<G: Game> {
    pub state: G,
    pub action: Option<G::Action>,
    /// Actions without a child node yet.
    pub untried: SmallVec<[G::Action; 8]>,
    pub prop: Proportion,
    pub depth: u8,
}

impl<G: Game> NodeData<G> {
    #[inline]
    pub fn new(state: G, action: Option<G::Action>, depth: u8) -> Self {
        let untried = state.actions().into_iter().collect();
        Self {
            state,
            action,
            untried,
            prop: Default::default(),
            depth,
        }
    }

    #[inline]
    fn is_maximize(&self, maximize_player: PlayerId) -> bool {
        self.state.to_move().unwrap_or(maximize_player) == maximize_player
    }

    /// Mean reward of this node for the side choosing it.
    #[inline]
    pub fn ratio(&self, is_maximize: bool) -> f32 {
        if is_maximize {
            self.prop.ratio()
        } else {
            self.prop.complement().ratio()
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MCTSConfig {
    pub num_simulations: u32,
    /// Max. number of card plays per rollout.
    pub rollout_depth: u32,
    /// Exploration constant of UCB1.
    pub exploration: f32,
    pub seed: u64,
    pub debug: bool,
}

impl MCTSConfig {
    pub const DEFAULT: Self = Self {
        num_simulations: 1000,
        rollout_depth: 24,
        exploration: std::f32::consts::SQRT_2,
        seed: 0,
        debug: false,
    };

    pub fn new(num_simulations: u32, rollout_depth: u32) -> Self {
        Self {
            num_simulations,
            rollout_depth,
            ..Self::DEFAULT
        }
    }
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Upper confidence tree search over a single determinization of the root position.
///
/// `search_hidden` samples the opponent's hand once and every tree node, opponent nodes
/// included, is played against that hand for the whole search. A pending draw is sampled
/// once when its child is expanded, so each tree node holds one fixed stock order.
/// Only rollouts resample the opponent's hand, at every opponent move.
#[derive(Debug)]
pub struct MCTS<G: Game, S: SelectionPolicy<G> = UCB1> {
    pub config: MCTSConfig,
    pub maximize_player: PlayerId,
    pub tree: Arena<NodeData<G>>,
    pub root: Option<Token>,
    pub selection_policy: S,
    rng: SmallRng,
}

impl<G: Game> MCTS<G> {
    pub fn new(config: MCTSConfig) -> Self {
        Self::new_with_selection_policy(config, UCB1)
    }
}

impl<G: Game, S: SelectionPolicy<G>> MCTS<G, S> {
    pub fn new_with_selection_policy(config: MCTSConfig, selection_policy: S) -> Self {
        Self {
            config,
            maximize_player: PlayerId::PlayerFirst,
            tree: Arena::new(),
            root: None,
            selection_policy,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    fn init(&mut self, init: G, maximize_player: PlayerId) -> Token {
        let root = NodeData::new(init, None, 0);
        let (tree, root_token) = Arena::<NodeData<G>>::with_data(root);
        self.tree = tree;
        self.maximize_player = maximize_player;
        self.root = Some(root_token);
        root_token
    }

    /// Child of `token` with the highest selection score. The first child wins ties.
    fn select_child(&self, token: Token) -> Option<Token> {
        let parent_node = self.tree.get(token)?;
        let parent = &parent_node.data;
        let ctx = SelectionPolicyContext {
            config: &self.config,
            parent,
            is_maximize: parent.is_maximize(self.maximize_player),
        };
        let mut best: Option<(Token, f32)> = None;
        for child in parent_node.children(&self.tree) {
            let score = self.selection_policy.score(&ctx, &child.data);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child.token(), score));
            }
        }
        best.map(|(t, _)| t)
    }

    /// Descend while the node is fully expanded and has children.
    fn select(&self, token: Token, path: &mut Vec<Token>) -> Token {
        let mut token = token;
        loop {
            let Some(node) = self.tree.get(token) else {
                return token;
            };
            if !node.data.untried.is_empty() || node.is_leaf() {
                return token;
            }
            let Some(next) = self.select_child(token) else {
                return token;
            };
            path.push(next);
            token = next;
        }
    }

    /// Add a child for a random untried action. Chance steps after the action are sampled.
    fn expand(&mut self, token: Token, counter: &mut SearchCounter) -> Option<Token> {
        let Self { tree, rng, .. } = self;
        let node = tree.get_mut(token)?;
        if node.data.untried.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..node.data.untried.len());
        let action = node.data.untried.swap_remove(i);
        let depth = node.data.depth + 1;
        let mut next = node.data.state.clone();
        if let Err(err) = next.advance(action) {
            debug!("MCTS::expand: {action:?} failed: {err:?}");
            return None;
        }
        counter.states_visited += 1;
        if next.to_move().is_none() && !next.is_terminal() {
            next.sample_chance(rng);
            counter.chance_nodes += 1;
        }
        Some(token.append(tree, NodeData::new(next, Some(action), depth)))
    }

    fn rollout(&mut self, token: Token, counter: &mut SearchCounter) -> Proportion {
        let Some(node) = self.tree.get(token) else {
            return Default::default();
        };
        let mut game = node.data.state.clone();
        let rng = &mut self.rng;
        let mut plies = 0;
        while plies < self.config.rollout_depth && !game.is_terminal() {
            let Some(player_id) = game.to_move() else {
                game.sample_chance(rng);
                counter.chance_nodes += 1;
                if game.to_move().is_none() && !game.is_terminal() {
                    break;
                }
                continue;
            };
            if player_id != self.maximize_player {
                game.hide_private_information(player_id, rng);
                counter.opponent_samples += 1;
            }
            let actions: SmallVec<[G::Action; 8]> = game.actions().into_iter().collect();
            let Some(&action) = actions.choose(rng) else {
                break;
            };
            if game.advance(action).is_err() {
                break;
            }
            counter.states_visited += 1;
            plies += 1;
        }
        counter.add_in_place(&SearchCounter::EVAL);
        Proportion::from_eval(game.eval(self.maximize_player))
    }

    fn backpropagate(&mut self, path: &[Token], dprop: Proportion) {
        for token in path.iter().copied() {
            if let Some(node) = self.tree.get_mut(token) {
                node.data.prop += dprop;
            }
        }
    }

    fn iteration(&mut self, root: Token, counter: &mut SearchCounter) {
        let mut path = Vec::with_capacity(16);
        path.push(root);
        let selected = self.select(root, &mut path);
        let leaf = match self.expand(selected, counter) {
            Some(child) => {
                path.push(child);
                child
            }
            None => selected,
        };
        let dprop = self.rollout(leaf, counter);
        self.backpropagate(&path, dprop);
        counter.simulations += 1;
    }

    /// The most visited child of `token` and its mean reward for the maximizing side.
    fn most_visited_child(&self, token: Token) -> Option<(G::Action, f32)> {
        let node = self.tree.get(token)?;
        let mut best: Option<&atree::Node<NodeData<G>>> = None;
        for child in node.children(&self.tree) {
            if best.map_or(true, |b| child.data.prop.n > b.data.prop.n) {
                best = Some(child);
            }
        }
        let best = best?;
        Some((best.data.action?, best.data.prop.ratio()))
    }
}

impl<G: Game, S: SelectionPolicy<G>> GameTreeSearch<G> for MCTS<G, S> {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> SearchResult<G> {
        if position.to_move().is_none() {
            return Default::default();
        }
        let t0 = Instant::now();
        let mut counter = SearchCounter::ZERO;
        let root = self.init(position.clone(), maximize_player);
        for _ in 0..self.config.num_simulations {
            self.iteration(root, &mut counter);
        }

        let action_values = self
            .tree
            .get(root)
            .map(|node| {
                node.children(&self.tree)
                    .filter_map(|c| Some((c.data.action?, c.data.prop.ratio())))
                    .collect()
            })
            .unwrap_or_default();
        let (action, eval) = match self.most_visited_child(root) {
            Some((action, eval)) => (Some(action), eval),
            None => {
                let actions: SmallVec<[G::Action; 8]> = position.actions().into_iter().collect();
                let fallback = actions.choose(&mut self.rng).copied();
                if fallback.is_some() {
                    warn!("MCTS: root has no children, choosing at random");
                }
                (fallback, 0.5)
            }
        };
        debug!(
            "MCTS: {maximize_player} action={action:?} eval={eval:.3} sims={} {}",
            counter.simulations,
            counter.summary(t0.elapsed().as_nanos())
        );
        if self.config.debug {
            self.print_tree(root, 2, self.config.num_simulations / 20);
        }
        SearchResult {
            action,
            eval,
            action_values,
            counter,
        }
    }

    #[inline]
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
