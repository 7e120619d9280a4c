//! Pure view-state machines for the page shell and the result panel. The
//! rendering layer maps these onto CSS classes and owns the actual delays;
//! keeping the transitions here lets them be exercised without a browser.

use crate::error::LookupError;
use crate::record::UserRecord;

/// How long the fade-out runs before the hidden/visible swap may happen.
pub const SHELL_SETTLE_MS: u32 = 400;
/// Layout settle before scrolling the resolved record into view.
pub const SUCCESS_SCROLL_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    Landing,
    CpfEntry,
}

/// Two-state page shell with the fade made explicit: a transition begins with
/// `begin`, runs for [`SHELL_SETTLE_MS`] while the outgoing view fades, and
/// completes with `settle`. Re-targeting mid-fade supersedes the earlier
/// target, so after settling exactly one view is ever visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Settled(ShellView),
    Fading { from: ShellView, to: ShellView },
}

impl Default for Shell {
    fn default() -> Self {
        Shell::Settled(ShellView::Landing)
    }
}

impl Shell {
    /// Starts a fade toward `target`. A no-op when already settled there;
    /// while fading, only the target is replaced.
    pub fn begin(&mut self, target: ShellView) {
        *self = match *self {
            Shell::Settled(current) if current == target => Shell::Settled(current),
            Shell::Settled(current) => Shell::Fading {
                from: current,
                to: target,
            },
            Shell::Fading { from, .. } => Shell::Fading { from, to: target },
        };
    }

    /// Completes the most recent target. Idempotent: settling a settled
    /// shell (a stale timer firing after a superseded transition) changes
    /// nothing.
    pub fn settle(&mut self) -> ShellView {
        if let Shell::Fading { to, .. } = *self {
            *self = Shell::Settled(to);
        }
        self.visible()
    }

    /// The view currently occupying the page. During a fade the outgoing
    /// view is still in layout; the incoming one appears only after
    /// [`Shell::settle`].
    pub fn visible(&self) -> ShellView {
        match *self {
            Shell::Settled(view) => view,
            Shell::Fading { from, .. } => from,
        }
    }

    pub fn is_visible(&self, view: ShellView) -> bool {
        self.visible() == view
    }

    /// True while the given view is fading out.
    pub fn is_fading_out(&self, view: ShellView) -> bool {
        matches!(*self, Shell::Fading { from, to } if from == view && to != view)
    }
}

/// Result-panel state. Transitions are externally triggered only: a submit
/// enters `Loading`, the lookup's resolution enters `Success` or `Error`,
/// and the retry/correct actions return to `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Panel {
    #[default]
    Idle,
    Loading,
    Success(UserRecord),
    Error(String),
}

impl Panel {
    /// Applies a lookup resolution.
    pub fn resolved(result: Result<UserRecord, LookupError>) -> Self {
        match result {
            Ok(record) => Panel::Success(record),
            Err(err) => Panel::Error(err.to_string()),
        }
    }

    /// The panel container is only in layout once a lookup has started.
    pub fn is_revealed(&self) -> bool {
        !matches!(self, Panel::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_basic_transition() {
        let mut shell = Shell::default();
        assert_eq!(shell.visible(), ShellView::Landing);

        shell.begin(ShellView::CpfEntry);
        // outgoing view stays in layout until the fade completes
        assert_eq!(shell.visible(), ShellView::Landing);
        assert!(shell.is_fading_out(ShellView::Landing));

        assert_eq!(shell.settle(), ShellView::CpfEntry);
        assert_eq!(shell, Shell::Settled(ShellView::CpfEntry));
    }

    #[test]
    fn test_shell_retarget_before_settle() {
        // show CPF page, then bounce back before the first fade finished
        let mut shell = Shell::default();
        shell.begin(ShellView::CpfEntry);
        shell.begin(ShellView::Landing);

        assert_eq!(shell.settle(), ShellView::Landing);
        // the stale second timer must not flip the view again
        assert_eq!(shell.settle(), ShellView::Landing);
        assert!(shell.is_visible(ShellView::Landing));
        assert!(!shell.is_visible(ShellView::CpfEntry));
    }

    #[test]
    fn test_shell_begin_is_noop_when_already_there() {
        let mut shell = Shell::default();
        shell.begin(ShellView::Landing);
        assert_eq!(shell, Shell::Settled(ShellView::Landing));
    }

    #[test]
    fn test_panel_resolution() {
        let record = UserRecord {
            name: Some("Maria".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Panel::resolved(Ok(record.clone())),
            Panel::Success(record)
        );
        assert_eq!(
            Panel::resolved(Err(LookupError::Status(500))),
            Panel::Error("Erro na consulta: 500".to_string())
        );
        assert!(!Panel::Idle.is_revealed());
        assert!(Panel::Loading.is_revealed());
    }
}
