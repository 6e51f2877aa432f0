pub enum Action {
    ResetConversation(),
    SubmitPrompt(String),
}
