//! Update and draw traversals.

use arbor_core::{BoxModel, Metric, Rect};
use arbor_layout::{apply_transform_stack, resolve_box_model};
use glam::Vec2;
use tracing::{debug, debug_span, trace, warn};

use crate::tree::{Node, NodeId, Scene};

/// Receives visible nodes in draw order.
pub trait Painter<C = ()> {
    /// Called before a node's children are visited.
    fn enter(&mut self, node: &Node<C>, depth: usize);

    /// Called after a node's children are visited.
    fn exit(&mut self, _node: &Node<C>, _depth: usize) {}
}

impl<C> Scene<C> {
    /// Resolve every stale node, parents before children.
    ///
    /// A node is resolved when it is dirty or when its parent was resolved in
    /// this pass. Returns the number of nodes resolved.
    pub fn update(&mut self) -> usize {
        let _span = debug_span!("scene_update", nodes = self.nodes.len()).entered();

        let viewport = self.options.viewport;
        let screen = Metric::viewport(viewport);
        let mut resolved = 0;

        let mut stack: Vec<(NodeId, Metric, bool)> =
            self.roots.iter().rev().map(|&root| (root, screen, false)).collect();

        while let Some((id, parent, forced)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };

            let refresh = forced || node.dirty;
            if refresh {
                node.modeled = resolve_box_model(&node.box_model, &parent, viewport);
                node.metric = apply_transform_stack(&node.modeled, &node.transforms, &parent, viewport);
                node.dirty = false;
                resolved += 1;

                trace!(node = %id, center = ?node.metric.rect.center, extent = ?node.metric.rect.extent, "resolved");
                if self.options.warn_on_degenerate && node.metric.rect.is_degenerate() {
                    warn!(node = %id, extent = ?node.metric.rect.extent, "node resolved to a degenerate rect");
                }
            }

            let metric = node.metric;
            let arrangement = node.arrangement;
            let children = node.children.clone();

            if refresh && !arrangement.is_free() {
                self.arrange_children(&children, |models| arrangement.arrange(models));
            }

            stack.extend(children.iter().rev().map(|&child| (child, metric, refresh)));
        }

        debug!(resolved, "scene update complete");
        resolved
    }

    fn arrange_children(&mut self, children: &[NodeId], arrange: impl FnOnce(&mut [BoxModel])) {
        let mut models: Vec<BoxModel> = children
            .iter()
            .filter_map(|child| self.nodes.get(child).map(|n| n.box_model))
            .collect();
        arrange(&mut models);

        for (child, model) in children.iter().zip(models) {
            if let Some(node) = self.nodes.get_mut(child) {
                node.box_model = model;
                node.dirty = true;
            }
        }
    }

    /// Visit every visible node in pre-order. Hidden nodes hide their subtree.
    pub fn draw<P: Painter<C>>(&self, painter: &mut P) {
        for &root in &self.roots {
            self.draw_recursive(root, 0, painter);
        }
    }

    fn draw_recursive<P: Painter<C>>(&self, id: NodeId, depth: usize, painter: &mut P) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.visible {
            return;
        }

        painter.enter(node, depth);
        for &child in &node.children {
            self.draw_recursive(child, depth + 1, painter);
        }
        painter.exit(node, depth);
    }

    /// Find the topmost visible node whose rotated metric contains `point`.
    ///
    /// Children are not clipped to their parents, so every visible subtree is
    /// searched.
    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        // Test root nodes in reverse order (last one is on top)
        self.roots
            .iter()
            .rev()
            .find_map(|&root| self.hit_test_recursive(root, point))
    }

    fn hit_test_recursive(&self, id: NodeId, point: Vec2) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if !node.visible {
            return None;
        }

        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test_recursive(child, point))
            .or_else(|| node.metric.contains(point).then_some(id))
    }

    /// Axis-aligned bounds of every visible node's rotated metric.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut bounds = BoundsPainter::default();
        self.draw(&mut bounds);
        bounds.0
    }
}

#[derive(Default)]
struct BoundsPainter(Option<Rect>);

impl<C> Painter<C> for BoundsPainter {
    fn enter(&mut self, node: &Node<C>, _depth: usize) {
        let rect = node.metric().bounding_rect();
        self.0 = Some(match self.0 {
            Some(acc) => acc.union(&rect),
            None => rect,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;
    use crate::tree::NodeBuilder;
    use arbor_core::{Dimension, ReferenceMode, Transformation};
    use arbor_layout::StackArrangement;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.abs_diff_eq(b, 1e-3)
    }

    fn scene() -> Scene {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Scene::with_viewport(Vec2::new(1024.0, 768.0)).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(String, NodeId, usize)>,
    }

    impl Painter for Recorder {
        fn enter(&mut self, node: &Node, depth: usize) {
            self.events.push(("enter".into(), node.id(), depth));
        }

        fn exit(&mut self, node: &Node, depth: usize) {
            self.events.push(("exit".into(), node.id(), depth));
        }
    }

    #[test]
    fn test_root_resolves_against_viewport() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(Dimension::fixed(Vec2::new(200.0, 100.0))));
        assert_eq!(scene.update(), 1);

        let node = scene.get(root).unwrap();
        assert_eq!(node.metric().rect.center, Vec2::new(512.0, 384.0));
        assert_eq!(node.metric().rect.extent, Vec2::new(200.0, 100.0));
        assert!(!node.is_dirty());
    }

    #[test]
    fn test_children_resolve_against_transformed_parent() {
        let mut scene = scene();
        let root = scene.add_root(
            NodeBuilder::new(Dimension::fixed(Vec2::new(400.0, 200.0)))
                .with_transform(Transformation::translate(Vec2::new(100.0, 0.0))),
        );
        let child = scene
            .add_child(root, NodeBuilder::new(Dimension::scaled(Vec2::splat(0.5)).with_anchor(Vec2::new(0.25, 0.0))))
            .unwrap();
        scene.update();

        let root_node = scene.get(root).unwrap();
        assert_eq!(root_node.modeled_metric().rect.center, Vec2::new(512.0, 384.0));
        assert_eq!(root_node.metric().rect.center, Vec2::new(612.0, 384.0));

        let child_node = scene.get(child).unwrap();
        assert!(approx(child_node.metric().rect.center, Vec2::new(712.0, 384.0)));
        assert!(approx(child_node.metric().rect.extent, Vec2::new(200.0, 100.0)));
    }

    #[test]
    fn test_update_only_touches_stale_subtrees() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(Dimension::fill()));
        let a = scene.add_child(root, NodeBuilder::new(Dimension::scaled(Vec2::splat(0.5)))).unwrap();
        let _b = scene.add_child(root, NodeBuilder::new(Dimension::fixed(Vec2::splat(5.0)))).unwrap();
        let a1 = scene.add_child(a, NodeBuilder::new(Dimension::fill())).unwrap();

        assert_eq!(scene.update(), 4);
        assert_eq!(scene.update(), 0);

        scene.set_box_model(a, BoxModel::new(Dimension::scaled(Vec2::splat(0.25)))).unwrap();
        assert_eq!(scene.update(), 2);
        assert!(approx(scene.get(a1).unwrap().metric().rect.extent, Vec2::new(256.0, 192.0)));
    }

    #[test]
    fn test_viewport_change_reresolves_everything() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(Dimension::fill()));
        let child = scene.add_child(root, NodeBuilder::new(Dimension::scaled(Vec2::splat(0.5)))).unwrap();
        scene.update();

        scene.set_viewport(Vec2::new(800.0, 600.0)).unwrap();
        assert_eq!(scene.update(), 2);
        assert_eq!(scene.get(child).unwrap().metric().rect.extent, Vec2::new(400.0, 300.0));

        scene.set_viewport(Vec2::new(800.0, 600.0)).unwrap();
        assert_eq!(scene.update(), 0);
    }

    #[test]
    fn test_absolute_child_ignores_parent() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(Dimension::fixed(Vec2::splat(10.0)).with_position(Vec2::new(-300.0, 0.0))));
        let overlay = scene
            .add_child(root, NodeBuilder::new(Dimension::fill().with_mode(ReferenceMode::Absolute)))
            .unwrap();
        scene.update();
        let node = scene.get(overlay).unwrap();
        assert_eq!(node.metric().rect.center, Vec2::new(512.0, 384.0));
        assert_eq!(node.metric().rect.extent, Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn test_stack_arrangement_runs_before_children() {
        let mut scene = scene();
        let row = scene.add_root(
            NodeBuilder::new(Dimension::fixed(Vec2::new(300.0, 100.0)))
                .with_arrangement(StackArrangement::horizontal()),
        );
        let cells: Vec<NodeId> = (0..3)
            .map(|_| scene.add_child(row, NodeBuilder::new(Dimension::scaled(Vec2::new(0.0, 1.0)))).unwrap())
            .collect();
        scene.update();

        let lefts: Vec<f32> = cells.iter().map(|&c| scene.get(c).unwrap().metric().rect.left()).collect();
        for (left, expected) in lefts.iter().zip([362.0, 462.0, 562.0]) {
            assert!((left - expected).abs() < 1e-3, "left {left} != {expected}");
        }

        // A new child re-runs the arrangement for every sibling.
        let extra = scene.add_child(row, NodeBuilder::default()).unwrap();
        scene.update();
        assert!(approx(scene.get(extra).unwrap().metric().rect.extent, Vec2::new(75.0, 0.0)));
        assert!(approx(scene.get(cells[0]).unwrap().metric().rect.extent, Vec2::new(75.0, 100.0)));
    }

    #[test]
    fn test_stack_arrangement_survives_child_box_model_change() {
        let mut scene = scene();
        let row = scene.add_root(
            NodeBuilder::new(Dimension::fixed(Vec2::new(300.0, 100.0)))
                .with_arrangement(StackArrangement::horizontal()),
        );
        let a = scene.add_child(row, NodeBuilder::new(Dimension::scaled(Vec2::new(0.0, 1.0)))).unwrap();
        let _b = scene.add_child(row, NodeBuilder::new(Dimension::scaled(Vec2::new(0.0, 1.0)))).unwrap();
        scene.update();
        assert!(approx(scene.get(a).unwrap().metric().rect.extent, Vec2::new(150.0, 100.0)));

        scene.set_box_model(a, BoxModel::new(Dimension::fixed(Vec2::splat(20.0)))).unwrap();
        assert!(scene.get(row).unwrap().is_dirty());
        scene.update();

        // Main axis comes from the stack, the cross axis from the new model.
        let rect = scene.get(a).unwrap().metric().rect;
        assert!(approx(rect.extent, Vec2::new(150.0, 20.0)));
        assert!((rect.left() - 362.0).abs() < 1e-3);
    }

    #[test]
    fn test_free_parent_stays_clean_on_child_box_model_change() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::default());
        let child = scene.add_child(root, NodeBuilder::default()).unwrap();
        scene.update();

        scene.set_box_model(child, BoxModel::new(Dimension::fixed(Vec2::splat(20.0)))).unwrap();
        assert!(!scene.get(root).unwrap().is_dirty());
        assert!(scene.get(child).unwrap().is_dirty());
    }

    fn degenerate_model() -> BoxModel {
        BoxModel::new(Dimension::fixed(Vec2::new(200.0, 100.0)))
            .with_min(Dimension::fixed(Vec2::splat(10.0)).with_position(Vec2::new(500.0, 0.0)))
    }

    #[test]
    fn test_degenerate_rect_is_kept() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(degenerate_model()));
        scene.update();
        assert!(scene.get(root).unwrap().metric().rect.is_degenerate());
    }

    #[test]
    fn test_degenerate_rect_is_kept_without_warning() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let options = SceneOptions::default()
            .with_viewport(Vec2::new(1024.0, 768.0))
            .with_warn_on_degenerate(false);
        let mut scene: Scene = Scene::new(options).unwrap();
        assert!(!scene.options().warn_on_degenerate);

        let root = scene.add_root(NodeBuilder::new(degenerate_model()));
        scene.update();
        let rect = scene.get(root).unwrap().metric().rect;
        assert!(rect.is_degenerate());
        assert!(rect.extent.x < 0.0);
        assert!(!scene.get(root).unwrap().is_dirty());
    }

    #[test]
    fn test_draw_order_and_visibility() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::default());
        let a = scene.add_child(root, NodeBuilder::default()).unwrap();
        let hidden = scene.add_child(root, NodeBuilder::default().hidden()).unwrap();
        let _under_hidden = scene.add_child(hidden, NodeBuilder::default()).unwrap();
        let b = scene.add_child(a, NodeBuilder::default()).unwrap();
        scene.update();

        let mut recorder = Recorder::default();
        scene.draw(&mut recorder);
        let order: Vec<(&str, NodeId, usize)> =
            recorder.events.iter().map(|(kind, id, depth)| (kind.as_str(), *id, *depth)).collect();
        assert_eq!(
            order,
            vec![
                ("enter", root, 0),
                ("enter", a, 1),
                ("enter", b, 2),
                ("exit", b, 2),
                ("exit", a, 1),
                ("exit", root, 0),
            ]
        );
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = scene();
        let root = scene.add_root(NodeBuilder::new(Dimension::fill()));
        let under = scene.add_child(root, NodeBuilder::new(Dimension::fixed(Vec2::splat(100.0)))).unwrap();
        let over = scene
            .add_child(root, NodeBuilder::new(Dimension::fixed(Vec2::splat(100.0)).with_position(Vec2::new(50.0, 0.0))))
            .unwrap();
        scene.update();

        assert_eq!(scene.hit_test(Vec2::new(520.0, 384.0)), Some(over));
        assert_eq!(scene.hit_test(Vec2::new(470.0, 384.0)), Some(under));
        assert_eq!(scene.hit_test(Vec2::new(10.0, 10.0)), Some(root));
        assert_eq!(scene.hit_test(Vec2::new(2000.0, 10.0)), None);

        scene.set_visible(over, false).unwrap();
        assert_eq!(scene.hit_test(Vec2::new(520.0, 384.0)), Some(under));
    }

    #[test]
    fn test_hit_test_respects_rotation() {
        let mut scene = scene();
        let bar = scene.add_root(
            NodeBuilder::new(Dimension::fixed(Vec2::new(200.0, 20.0)))
                .with_transform(Transformation::rotate(FRAC_PI_2)),
        );
        scene.update();

        assert_eq!(scene.hit_test(Vec2::new(512.0, 470.0)), Some(bar));
        assert_eq!(scene.hit_test(Vec2::new(600.0, 384.0)), None);
    }

    #[test]
    fn test_content_bounds() {
        let mut scene = scene();
        assert!(scene.content_bounds().is_none());

        let root = scene.add_root(NodeBuilder::new(Dimension::fixed(Vec2::new(100.0, 100.0))));
        scene
            .add_child(root, NodeBuilder::new(Dimension::fixed(Vec2::splat(20.0)).with_position(Vec2::new(100.0, 0.0))))
            .unwrap();
        scene.update();

        let bounds = scene.content_bounds().unwrap();
        assert!((bounds.left() - 462.0).abs() < 1e-3);
        assert!((bounds.right() - 622.0).abs() < 1e-3);
    }
}
