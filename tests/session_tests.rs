use trailcam::{
    Error, FrameMatrices, Input, KeyAction, KeyCode, LightingOptions, Options, Renderer,
    SceneOptions, Session, SessionControl, Vec3,
};

fn options_without_path_cube() -> Options {
    Options {
        scene: SceneOptions {
            path_cube: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<FrameMatrices>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &FrameMatrices) {
        self.frames.push(frame.clone());
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_record_key_appends_camera_position() {
        let mut session = Session::new(&Options::default());
        let mut input = Input::new();

        // Fly forward for a second, then drop a waypoint.
        input.press(KeyCode::KeyW);
        session.update(&input, 1.0);
        input.release(KeyCode::KeyW);
        input.begin_frame();

        let eye = session.camera().position;
        input.press(KeyCode::KeyP);
        session.update(&input, 0.0);

        assert!((eye - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        let frame = session.frame(1.0);
        assert_eq!(frame.models.len(), 1);
        assert_eq!(frame.path_cube, Some(Vec3::ZERO));

        input.begin_frame();
        session.update(&input, 0.5);
        let cube = session.frame(1.0).path_cube.unwrap();
        assert!((cube - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_spawn_and_nudge() {
        let mut session = Session::new(&options_without_path_cube());
        assert_eq!(session.apply(KeyAction::SpawnCube), SessionControl::Continue);
        session.apply(KeyAction::NudgeUp);
        session.apply(KeyAction::NudgeRight);

        let models = session.frame(1.0).models;
        assert_eq!(models.len(), 1);
        let origin = models[0].transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.1, 0.1, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_scale_keys_use_configured_factors() {
        let mut session = Session::new(&options_without_path_cube());
        session.apply(KeyAction::SpawnCube);
        session.apply(KeyAction::ScaleUp);
        session.apply(KeyAction::ScaleUp);
        session.apply(KeyAction::ScaleDown);

        let model = session.frame(1.0).models[0];
        let edge = model.transform_vector3(Vec3::X).length();
        assert!((edge - 1.05 * 1.05 * 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_escape_quits() {
        let mut session = Session::new(&Options::default());
        let mut input = Input::new();
        input.press(KeyCode::Escape);
        assert_eq!(session.update(&input, 0.016), SessionControl::Quit);
    }

    #[test]
    fn test_mouse_look_turns_camera() {
        let mut session = Session::new(&Options::default());
        let mut input = Input::new();
        input.cursor_moved(trailcam::Vec2::new(500.0, 400.0));
        input.cursor_moved(trailcam::Vec2::new(600.0, 300.0));
        session.update(&input, 0.016);

        // 100 px right and 100 px up at 0.1 degrees per pixel.
        assert!((session.camera().yaw() - (-80.0)).abs() < 1e-4);
        assert!((session.camera().pitch() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_render_hands_frame_to_renderer() {
        let mut session = Session::new(&Options::default());
        session.apply(KeyAction::SpawnCube);
        let mut renderer = RecordingRenderer::default();

        session.render(&mut renderer, 1.25);

        assert_eq!(renderer.frames.len(), 1);
        let frame = &renderer.frames[0];
        assert_eq!(frame.models.len(), 2);
        assert!(frame.view.abs_diff_eq(session.camera().view_matrix(), 1e-6));
        assert!(
            frame
                .projection
                .abs_diff_eq(frame.camera.projection_matrix(1.25), 1e-6)
        );
    }

    #[test]
    fn test_lighting_reaches_renderer() {
        let options = Options {
            lighting: LightingOptions {
                position: [0.0, 5.0, 0.0],
                shininess: 16.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut session = Session::new(&options);
        let mut input = Input::new();
        input.press(KeyCode::KeyD);
        session.update(&input, 1.0);

        let mut renderer = RecordingRenderer::default();
        session.render(&mut renderer, 1.0);

        let frame = &renderer.frames[0];
        assert_eq!(frame.lighting.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(frame.lighting.shininess, 16.0);
        assert_eq!(frame.lighting.diffuse, Vec3::splat(0.5));
        assert_eq!(frame.view_position, session.camera().position);
        assert!((frame.view_position - Vec3::new(3.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_zero_arrival_epsilon_preset_is_refused() {
        let text = "[trajectory]\narrival_epsilon = 0.0\n";
        let err = Options::from_toml_str(text).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn test_path_cube_stays_finite_on_coincident_start() {
        // Options built in code skip preset validation.
        let mut options = Options::default();
        options.trajectory.arrival_epsilon = 0.0;
        let mut session = Session::new(&options);
        session.scene_mut().record_waypoint(Vec3::ZERO);
        session.scene_mut().record_waypoint(Vec3::new(3.0, 0.0, 0.0));

        let input = Input::new();
        for _ in 0..3 {
            session.update(&input, 0.1);
        }
        let cube = session.frame(1.0).path_cube.unwrap();
        assert!(cube.is_finite(), "path cube went to {cube:?}");
    }
}
