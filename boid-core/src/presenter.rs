use crate::vector::Vector2D;
use crate::world::World;

/// What the front end reports before each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer location in world coordinates, if the pointer is over the world.
    pub pointer: Option<Vector2D>,
    /// False once the front end has been asked to quit.
    pub keep_running: bool,
}

impl FrameInput {
    pub fn running(pointer: Option<Vector2D>) -> Self {
        Self {
            pointer,
            keep_running: true,
        }
    }

    pub fn quit() -> Self {
        Self {
            pointer: None,
            keep_running: false,
        }
    }
}

/// The presentation collaborator: supplies input, draws frames and owns pacing.
pub trait Presenter {
    type Error;

    fn input(&mut self) -> FrameInput;

    fn present(&mut self, world: &World) -> Result<(), Self::Error>;
}

/// Polls, ticks and presents until the presenter asks to stop.
/// Returns the number of ticks run.
pub fn run<P: Presenter>(world: &mut World, presenter: &mut P) -> Result<u64, P::Error> {
    let mut ticks = 0;
    loop {
        let input = presenter.input();
        if !input.keep_running {
            return Ok(ticks);
        }
        world.tick(input.pointer);
        ticks += 1;
        presenter.present(world)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::config::WorldConfig;

    struct Scripted {
        inputs: Vec<FrameInput>,
        presented: Vec<u64>,
        fail_at: Option<u64>,
    }

    impl Presenter for Scripted {
        type Error = u64;

        fn input(&mut self) -> FrameInput {
            if self.inputs.is_empty() {
                FrameInput::quit()
            } else {
                self.inputs.remove(0)
            }
        }

        fn present(&mut self, world: &World) -> Result<(), u64> {
            if self.fail_at == Some(world.tick_count()) {
                return Err(world.tick_count());
            }
            self.presented.push(world.tick_count());
            Ok(())
        }
    }

    fn world() -> World {
        World::new(
            WorldConfig::default(),
            vec![Agent::new(Vector2D::new(10.0, 10.0), Vector2D::new(1.0, 0.0))],
            Vec::new(),
        )
    }

    #[test]
    fn test_run_until_quit() {
        let mut presenter = Scripted {
            inputs: vec![FrameInput::running(None); 3],
            presented: Vec::new(),
            fail_at: None,
        };
        let mut world = world();

        assert_eq!(run(&mut world, &mut presenter), Ok(3));
        assert_eq!(presenter.presented, vec![1, 2, 3]);
        assert_eq!(world.tick_count(), 3);
    }

    #[test]
    fn test_quit_before_first_tick() {
        let mut presenter = Scripted {
            inputs: vec![FrameInput::quit()],
            presented: Vec::new(),
            fail_at: None,
        };
        let mut world = world();

        assert_eq!(run(&mut world, &mut presenter), Ok(0));
        assert_eq!(world.tick_count(), 0);
    }

    #[test]
    fn test_pointer_reaches_the_world() {
        let mut presenter = Scripted {
            inputs: vec![FrameInput::running(Some(Vector2D::new(15.0, 10.0)))],
            presented: Vec::new(),
            fail_at: None,
        };
        let mut world = world();

        run(&mut world, &mut presenter).unwrap();
        // Repelled westward hard enough to reverse.
        assert!(world.boids()[0].velocity.x < 0.0);
    }

    #[test]
    fn test_present_error_stops_the_loop() {
        let mut presenter = Scripted {
            inputs: vec![FrameInput::running(None); 5],
            presented: Vec::new(),
            fail_at: Some(2),
        };
        let mut world = world();

        assert_eq!(run(&mut world, &mut presenter), Err(2));
        assert_eq!(presenter.presented, vec![1]);
    }
}
