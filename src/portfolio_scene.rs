//! The portfolio room and its clickable info props

use frame_scheduler::{EventSource, InputEvent, InputQueue};
use glam::Vec3;
use scene_picking::{Camera, SceneGraph, SceneNode, Shape, TagRegistry, Transform, Viewport};
use std::f32::consts::PI;

/// Where each prop sits in the room, and its turn about +Y
const INFO_PROPS: [(&str, [f32; 3], f32); 8] = [
    ("monitor", [10.2, -6.1, -16.0], 0.0),
    ("mataua", [-6.0, -5.8, -14.5], PI / 8.0),
    ("ieee", [0.0, -9.92, -10.0], 0.0),
    ("lago", [8.5, -9.92, -5.2], -PI / 5.5),
    ("lienzo", [-14.0, -9.92, -6.2], PI / 4.0),
    ("pastel", [15.0, -9.92, -6.2], -PI / 6.0),
    ("cv", [-6.0, -9.92, 1.0], 0.0),
    ("libro", [10.0, -9.92, 2.5], 0.0),
];

const PROP_HALF_EXTENT: f32 = 0.8;

/// Build the room: an untagged floor plus one tagged prop per content key.
pub fn build_scene(tags: &TagRegistry) -> SceneGraph {
    let mut scene = SceneGraph::new();
    let root = scene.root();

    scene.add(
        root,
        SceneNode::new()
            .with_name("Room")
            .with_transform(Transform::from_translation(Vec3::new(0.0, -10.5, -5.0)))
            .with_shape(Shape::Cuboid {
                half_extents: Vec3::new(20.0, 0.5, 20.0),
            }),
    );

    for (key, position, rot_y) in INFO_PROPS {
        let transform = Transform::from_translation(Vec3::from_array(position)).with_rotation_y(rot_y);
        let Some(model) = scene.add(root, SceneNode::new().with_transform(transform)) else {
            continue;
        };
        scene.add(
            model,
            SceneNode::new().with_shape(Shape::Cuboid {
                half_extents: Vec3::splat(PROP_HALF_EXTENT),
            }),
        );
        let tagged = scene.tag_subtree(model, &tags.tag_name(key));
        log::debug!("prop {key}: {tagged} mesh(es) tagged");
    }

    log::info!("portfolio scene built with {} nodes", scene.len());
    scene
}

/// Pixel position of a world point as seen by `camera`
pub fn screen_position(point: Vec3, camera: &Camera, viewport: &Viewport) -> Option<(f32, f32)> {
    let ndc = camera.build_view_projection_matrix().project_point3(point);
    if !ndc.is_finite() || ndc.z < 0.0 || ndc.z > 1.0 {
        return None;
    }
    Some((
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    ))
}

/// Timestamped input replayed into the scheduler
pub struct ScriptedInput {
    events: Vec<(f64, InputEvent)>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(f64, InputEvent)>) -> Self {
        events.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { events, cursor: 0 }
    }

    /// Grab the camera, trace a cursor loop, then click every prop in turn.
    ///
    /// The grab at t = 0 holds auto-rotation off while the clicks land, so the
    /// props are still where the camera first saw them.
    pub fn tour(camera: &Camera, viewport: &Viewport) -> Self {
        let mut events = vec![(0.0, InputEvent::CameraDragStart)];

        let center = viewport.center();
        let radius = viewport.height * 0.25;
        for i in 0..90 {
            let angle = i as f32 / 90.0 * 2.0 * PI;
            events.push((
                i as f64 * 10.0,
                InputEvent::PointerMove {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                },
            ));
        }

        for (i, (key, position, _)) in INFO_PROPS.iter().enumerate() {
            match screen_position(Vec3::from_array(*position), camera, viewport) {
                Some((x, y)) => events.push((1000.0 + i as f64 * 250.0, InputEvent::Click { x, y })),
                None => log::warn!("prop {key} is off screen"),
            }
        }

        Self::new(events)
    }
}

impl EventSource for ScriptedInput {
    fn poll(&mut self, now_ms: f64, queue: &mut InputQueue) {
        while let Some((at, event)) = self.events.get(self.cursor) {
            if *at > now_ms {
                break;
            }
            queue.push(*event);
            self.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_picking::HitTestDispatcher;

    #[test]
    fn test_every_prop_is_clickable_from_the_scene_camera() {
        let tags = TagRegistry::default();
        let scene = build_scene(&tags);
        let camera = Camera::scene(1280, 720);
        let viewport = Viewport::new(1280.0, 720.0).unwrap();
        let dispatcher = HitTestDispatcher::new(tags);

        for (key, position, _) in INFO_PROPS {
            let (x, y) = screen_position(Vec3::from_array(position), &camera, &viewport).unwrap();
            let hit = dispatcher.dispatch(x, y, &viewport, &camera, &scene).unwrap();
            assert_eq!(hit.key.as_str(), key);
        }
    }

    #[test]
    fn test_script_replays_in_time_order() {
        let mut input = ScriptedInput::new(vec![
            (20.0, InputEvent::Click { x: 1.0, y: 1.0 }),
            (0.0, InputEvent::CameraDragStart),
        ]);
        let mut queue = InputQueue::new();

        input.poll(10.0, &mut queue);
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec![InputEvent::CameraDragStart]);

        input.poll(20.0, &mut queue);
        assert_eq!(queue.len(), 1);
        input.poll(100.0, &mut queue);
        assert_eq!(queue.len(), 1);
    }
}
