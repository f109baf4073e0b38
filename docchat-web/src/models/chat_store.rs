use shared::conversation::{ConversationAction, ConversationState};
use std::rc::Rc;
use yewdux::prelude::{Reducer, Store};

/// Global UI state: the conversation and its error banner.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct ChatStore {
    pub conversation: ConversationState,
}

impl Reducer<ChatStore> for ConversationAction {
    fn apply(self, mut state: Rc<ChatStore>) -> Rc<ChatStore> {
        Rc::make_mut(&mut state).conversation.apply(self);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::conversation::ASK_FAILED_BANNER;
    use shared::models::{ChatMessage, RequestId};

    #[test]
    fn actions_flow_through_the_store() {
        let request = RequestId::fresh();
        let state = Rc::new(ChatStore::default());

        let state = ConversationAction::AskStarted {
            request,
            prompt: "Hello".into(),
        }
        .apply(state);
        assert_eq!(state.conversation.pending_count(), 1);

        let state = ConversationAction::AskSucceeded {
            request,
            answer: "Hi!".into(),
        }
        .apply(state);
        assert_eq!(
            state.conversation.messages(),
            &[ChatMessage::user("Hello"), ChatMessage::ai("Hi!")]
        );
    }

    #[test]
    fn failure_sets_banner_in_store() {
        let request = RequestId::fresh();
        let state = ConversationAction::AskStarted {
            request,
            prompt: "Hello".into(),
        }
        .apply(Rc::new(ChatStore::default()));
        let state = ConversationAction::AskFailed { request }.apply(state);

        assert_eq!(state.conversation.error(), Some(ASK_FAILED_BANNER));
    }
}
