use anchora_core::{ArSession, FrameInput};

/// Replays a pre-built frame sequence as if it were a live AR session.
pub(crate) struct ScriptedSession {
    frames: std::vec::IntoIter<FrameInput>,
    ended: bool,
}

impl ScriptedSession {
    pub fn new(frames: Vec<FrameInput>) -> Self {
        Self {
            frames: frames.into_iter(),
            ended: false,
        }
    }
}

impl ArSession for ScriptedSession {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.ended {
            return None;
        }
        self.frames.next()
    }

    fn end(&mut self) {
        self.ended = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_stops_frame_delivery() {
        let mut session = ScriptedSession::new(vec![FrameInput::default(), FrameInput::default()]);
        assert!(session.next_frame().is_some());
        session.end();
        assert!(session.next_frame().is_none());
    }
}
