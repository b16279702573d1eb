use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    SubmitAuth,
    TrialLogin,
    OpenProfile,
    OpenHome,
    SaveEdit,
    CreateProfile { nickname: String },
    SignOut,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
