use crate::app::App;
use crate::mpris::MprisHandle;
use crate::player::PlaybackState;

/// What was last published on the bus, to avoid redundant updates.
#[derive(Debug, Default, PartialEq)]
pub struct Published {
    index: Option<usize>,
    path: Option<std::path::PathBuf>,
    playback: PlaybackState,
}

impl Published {
    fn of(app: &App) -> Self {
        Self {
            index: app.player.current_index(),
            path: app.player.current_path().map(|p| p.to_path_buf()),
            playback: app.player.state(),
        }
    }
}

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let index = app.player.current_index();
    mpris.set_track_metadata(index, app.player.current_track());
    mpris.set_playback(app.player.state());
}

/// Publish only when the current track or the playback state changed.
pub fn sync_mpris(mpris: &MprisHandle, app: &App, last: &mut Published) {
    let now = Published::of(app);
    if now != *last {
        update_mpris(mpris, app);
        *last = now;
    }
}
