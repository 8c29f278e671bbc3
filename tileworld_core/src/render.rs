use tileworld_ids::{ImageId, ObjectId};

use crate::camera::VIEW_SCALE_FACTOR;
use crate::components::{Label, TextAlign};
use crate::scene::Scene;
use crate::structs2d::{Coordinate2D, Rect, Size2D};

/// Text attributes forwarded to the sink alongside the string.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: String,
    pub align: TextAlign,
    pub font: String,
}

impl TextStyle {
    fn from_label(label: &Label) -> Self {
        Self {
            size_px: label.size_px,
            color: label.color.clone(),
            align: label.align,
            font: label.font.clone(),
        }
    }
}

/// Backend the renderer draws into. The core emits draw calls in world units;
/// the sink owns the actual surface and applies the scale it is handed.
pub trait DrawSink {
    fn clear(&mut self, area: Rect);
    fn set_scale(&mut self, scale: f32);
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn draw_image(&mut self, image: ImageId, destination: Rect, flip_horizontal: bool);
    fn draw_text(&mut self, text: &str, position: Coordinate2D, style: &TextStyle);
}

/// Draws one frame of the scene into the sink.
///
/// Traversal is depth-first over the root list, each parent before its
/// children, so children paint over their parents and positions accumulate
/// down the tree without re-walking ancestor chains. Every destination is
/// offset by the camera's coordinates.
pub fn render_scene(scene: &Scene, viewport: Size2D, sink: &mut dyn DrawSink) {
    sink.clear(Rect::new(0.0, 0.0, viewport.width(), viewport.height()));
    sink.set_scale(viewport.height() * VIEW_SCALE_FACTOR);

    let camera_offset = scene.camera.coordinates();
    for &root in scene.roots() {
        draw_subtree(scene, root, camera_offset, sink);
    }
}

fn draw_subtree(
    scene: &Scene,
    id: ObjectId,
    parent_position: Coordinate2D,
    sink: &mut dyn DrawSink,
) {
    let Some(object) = scene.objects.get(id) else {
        return;
    };
    let position = parent_position + object.coordinates();

    if let Some(sprite) = object.components.sprite() {
        if sprite.enabled && !sprite.image.is_nil() {
            let origin = position + sprite.offset;
            let destination = Rect::from_origin_size(origin, sprite.size);
            sink.draw_image(sprite.image, destination, sprite.flip_horizontal);
        }
    }

    if let Some(label) = object.components.label() {
        if label.enabled {
            sink.save_state();
            sink.draw_text(&label.text, position, &TextStyle::from_label(label));
            sink.restore_state();
        }
    }

    for &child in object.children() {
        draw_subtree(scene, child, position, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, Sprite};
    use crate::object::WorldObject;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(Rect),
        SetScale(f32),
        Save,
        Restore,
        Image(ImageId, Rect, bool),
        Text(String, Coordinate2D),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
    }

    impl DrawSink for RecordingSink {
        fn clear(&mut self, area: Rect) {
            self.calls.push(Call::Clear(area));
        }

        fn set_scale(&mut self, scale: f32) {
            self.calls.push(Call::SetScale(scale));
        }

        fn save_state(&mut self) {
            self.calls.push(Call::Save);
        }

        fn restore_state(&mut self) {
            self.calls.push(Call::Restore);
        }

        fn draw_image(&mut self, image: ImageId, destination: Rect, flip_horizontal: bool) {
            self.calls.push(Call::Image(image, destination, flip_horizontal));
        }

        fn draw_text(&mut self, text: &str, position: Coordinate2D, _style: &TextStyle) {
            self.calls.push(Call::Text(text.to_string(), position));
        }
    }

    fn sprite_object(name: &str, x: f32, y: f32, image: ImageId) -> WorldObject {
        let mut object = WorldObject::new(name.to_string());
        object.move_to(x, y).unwrap();
        object.components.attach(Component::Sprite(Sprite::new(
            image,
            Size2D::new(16.0, 16.0).unwrap(),
        )));
        object
    }

    #[test]
    fn frame_starts_with_clear_and_scale() {
        let scene = Scene::new();
        let viewport = Size2D::new(800.0, 600.0).unwrap();
        let mut sink = RecordingSink::default();

        render_scene(&scene, viewport, &mut sink);
        assert_eq!(
            sink.calls,
            vec![
                Call::Clear(Rect::new(0.0, 0.0, 800.0, 600.0)),
                Call::SetScale(600.0 * VIEW_SCALE_FACTOR),
            ]
        );
    }

    #[test]
    fn parents_draw_before_children_and_positions_accumulate() {
        let mut scene = Scene::new();
        let parent = scene.spawn(sprite_object("parent", 10.0, 20.0, ImageId::new(1)));
        scene
            .spawn_child(parent, sprite_object("child", 5.0, 5.0, ImageId::new(2)))
            .unwrap();
        scene.camera.move_to(100.0, 0.0).unwrap();

        let mut sink = RecordingSink::default();
        render_scene(&scene, Size2D::new(800.0, 600.0).unwrap(), &mut sink);

        let images: Vec<&Call> = sink
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Image(..)))
            .collect();
        assert_eq!(
            images,
            vec![
                &Call::Image(ImageId::new(1), Rect::new(110.0, 20.0, 16.0, 16.0), false),
                &Call::Image(ImageId::new(2), Rect::new(115.0, 25.0, 16.0, 16.0), false),
            ]
        );
    }

    #[test]
    fn nil_and_disabled_sprites_are_skipped() {
        let mut scene = Scene::new();
        scene.spawn(sprite_object("unloaded", 0.0, 0.0, ImageId::nil()));
        let mut hidden = sprite_object("hidden", 0.0, 0.0, ImageId::new(3));
        hidden.components.sprite_mut().unwrap().enabled = false;
        scene.spawn(hidden);

        let mut sink = RecordingSink::default();
        render_scene(&scene, Size2D::new(800.0, 600.0).unwrap(), &mut sink);
        assert!(!sink.calls.iter().any(|c| matches!(c, Call::Image(..))));
    }

    #[test]
    fn labels_draw_between_state_save_and_restore() {
        let mut scene = Scene::new();
        let mut sign = WorldObject::new("sign");
        sign.move_to(40.0, 8.0).unwrap();
        sign.components
            .attach(Component::Label(Label::new("hello")));
        scene.spawn(sign);

        let mut sink = RecordingSink::default();
        render_scene(&scene, Size2D::new(800.0, 600.0).unwrap(), &mut sink);

        assert_eq!(
            &sink.calls[2..],
            &[
                Call::Save,
                Call::Text("hello".to_string(), Coordinate2D::new(40.0, 8.0)),
                Call::Restore,
            ]
        );
    }

    #[test]
    fn sprite_offset_shifts_the_destination() {
        let mut scene = Scene::new();
        let mut object = sprite_object("shifted", 10.0, 10.0, ImageId::new(7));
        object.components.sprite_mut().unwrap().offset = Coordinate2D::new(-3.0, 2.0);
        object.components.sprite_mut().unwrap().flip_horizontal = true;
        scene.spawn(object);

        let mut sink = RecordingSink::default();
        render_scene(&scene, Size2D::new(800.0, 600.0).unwrap(), &mut sink);
        assert!(sink.calls.contains(&Call::Image(
            ImageId::new(7),
            Rect::new(7.0, 12.0, 16.0, 16.0),
            true
        )));
    }
}
