use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use leptos::{html, prelude::*};
use leptos::task::spawn_local;

use crate::chat::{
    ChatMessage, ChatOutcome, ChatRequest, ChatResponse, ChatSession, Role, CLOSE_MS,
    OPEN_CONTENT_MS, OPEN_MESSAGES_MS,
};
use crate::i18n::t;
use crate::scrollbar::MIN_THUMB_CHAT_PX;

use super::notify::Notifier;
use super::scrollbar::CustomScrollbar;
use super::track::{self, Identity};
use super::{push_history_marker, AppState, LoadPhase};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Chat widget state shared through context so the back button and Escape
/// handlers can close the window from outside.
#[derive(Clone, Copy)]
pub struct ChatController {
    pub phase: RwSignal<ChatPhase>,
    pub show_content: RwSignal<bool>,
    pub show_messages: RwSignal<bool>,
    session: RwSignal<ChatSession>,
    timers: StoredValue<Vec<Timeout>, LocalStorage>,
    state: AppState,
    notifier: Notifier,
    identity: Identity,
}

impl ChatController {
    pub fn new(state: AppState, notifier: Notifier, identity: Identity) -> ChatController {
        ChatController {
            phase: RwSignal::new(ChatPhase::Closed),
            show_content: RwSignal::new(false),
            show_messages: RwSignal::new(false),
            session: RwSignal::new(ChatSession::default()),
            timers: StoredValue::new_local(Vec::new()),
            state,
            notifier,
            identity,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.phase.get_untracked(),
            ChatPhase::Opening | ChatPhase::Open
        )
    }

    /// Opens the window: the frame expands first, then content fades in,
    /// then messages appear and the input takes focus.
    pub fn open(&self) {
        if self.phase.get_untracked() != ChatPhase::Closed {
            return;
        }
        self.phase.set(ChatPhase::Opening);
        push_history_marker("chat");
        let chat = *self;
        self.timers.set_value(vec![
            Timeout::new(OPEN_CONTENT_MS as u32, move || {
                chat.show_content.set(true);
            }),
            Timeout::new(OPEN_MESSAGES_MS as u32, move || {
                chat.phase.set(ChatPhase::Open);
                chat.show_messages.set(true);
                let lang = chat.state.lang.get_untracked();
                chat.session.update(|s| {
                    s.greet(lang);
                });
            }),
        ]);
    }

    /// Collapses the window; cancels a pending open choreography.
    pub fn close(&self) {
        if matches!(
            self.phase.get_untracked(),
            ChatPhase::Closed | ChatPhase::Closing
        ) {
            return;
        }
        self.phase.set(ChatPhase::Closing);
        let chat = *self;
        self.timers.set_value(vec![Timeout::new(CLOSE_MS as u32, move || {
            chat.phase.set(ChatPhase::Closed);
            chat.show_content.set(false);
            chat.show_messages.set(false);
        })]);
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Submits a message. Returns false when the input was rejected (window
    /// not fully open, empty text, or a reply still pending) so the caller
    /// can leave the input untouched.
    pub fn send(&self, input: String) -> bool {
        if self.phase.get_untracked() != ChatPhase::Open {
            return false;
        }
        let Some(message) = self
            .session
            .try_update(|s| s.begin_send(&input))
            .flatten()
        else {
            return false;
        };

        let chat = *self;
        spawn_local(async move {
            let uid = chat.identity.uid.get_untracked();
            let fingerprint = chat
                .identity
                .fingerprint
                .get_untracked()
                .unwrap_or_else(track::collect_fingerprint);
            let history = chat.session.with_untracked(|s| s.history().to_vec());
            let lang = chat.state.lang.get_untracked();

            let request = ChatRequest {
                uid: &uid,
                fingerprint: &fingerprint,
                history: &history,
                current_message: &message,
            };
            let outcome = match Request::post("/chat").json(&request) {
                Ok(request) => match request.send().await {
                    Ok(response) => match response.json::<ChatResponse>().await {
                        Ok(body) => ChatOutcome::classify(response.ok(), body),
                        Err(err) => {
                            log::warn!("chat response malformed: {err}");
                            ChatOutcome::unreachable_server(lang)
                        }
                    },
                    Err(err) => {
                        log::warn!("chat request failed: {err}");
                        ChatOutcome::unreachable_server(lang)
                    }
                },
                Err(err) => {
                    log::debug!("chat request not sent: {err}");
                    ChatOutcome::unreachable_server(lang)
                }
            };

            if outcome == ChatOutcome::Locked {
                log::debug!("chat session locked; reply dropped");
            }
            let bot_message = chat.session.try_update(|s| s.finish(outcome)).flatten();

            // A reply landing while the window is closed becomes a toast.
            if bot_message.is_some() && !chat.is_open() {
                chat.notifier.notify(
                    t(lang, "New message from AI", "Новое сообщение от ИИ"),
                    5000,
                );
            }
        });
        true
    }

    pub fn waiting(&self) -> bool {
        self.session.with(|s| s.waiting())
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.session.with(|s| s.transcript().to_vec())
    }
}

/// Floating chat button plus the expandable chat window.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let chat = expect_context::<ChatController>();
    let state = expect_context::<AppState>();
    let platform = expect_context::<super::track::Platform>();
    let lang = state.lang;
    let input_ref = NodeRef::<html::Input>::new();
    let transcript_ref = NodeRef::<html::Div>::new();

    // First-visit tooltip over the chat button.
    let hint = RwSignal::new(false);
    let hint_shown = StoredValue::new(false);
    Effect::new(move |_| {
        if state.phase.get() == LoadPhase::Full && !hint_shown.get_value() {
            hint_shown.set_value(true);
            hint.set(true);
            Timeout::new(3000, move || hint.set(false)).forget();
        }
    });

    Effect::new(move |_| {
        if chat.show_messages.get() {
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    });

    // Keep the transcript pinned to the newest message.
    Effect::new(move |_| {
        let _ = chat.transcript().len();
        let _ = chat.waiting();
        if let Some(el) = transcript_ref.get_untracked() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let submit = move || {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        if chat.send(input.value()) {
            input.set_value("");
        }
    };

    let window_class = move || {
        let base = "fixed right-4 bottom-20 z-40 flex flex-col overflow-hidden rounded-xl \
                    bg-gray-900 shadow-2xl transition-all duration-700 w-80 max-w-[calc(100vw-2rem)]";
        match chat.phase.get() {
            ChatPhase::Closed => format!("{base} h-0 opacity-0 pointer-events-none"),
            ChatPhase::Closing => format!("{base} h-0 opacity-0"),
            ChatPhase::Opening | ChatPhase::Open => format!("{base} h-[28rem] opacity-100"),
        }
    };

    view! {
        <button
            class="fixed right-4 bottom-4 z-40 flex h-12 w-12 items-center justify-center \
                   rounded-full bg-teal-500 text-gray-900 shadow-lg transition-transform \
                   hover:scale-110"
            class:scale-0=move || state.phase.get() == LoadPhase::Splash
            on:click=move |_| chat.toggle()
        >
            <svg viewBox="0 0 24 24" class="h-6 w-6 fill-current" aria-hidden="true">
                <path d="M12 3C6.48 3 2 6.92 2 11.75c0 2.35 1.06 4.48 2.79 6.05-.12 1.27-.55 2.62-1.45 3.54-.18.18-.05.49.2.47 1.85-.12 3.52-.89 4.73-1.73 1.15.41 2.41.64 3.73.64 5.52 0 10-3.92 10-8.75S17.52 3 12 3Z" />
            </svg>
        </button>
        <Show when=move || hint.get()>
            <div class="fixed right-20 bottom-6 z-40 rounded-md bg-gray-800 px-3 py-2 text-xs shadow-lg">
                {move || {
                    if platform.touch.get() {
                        t(lang.get(), "Tap to chat with AI", "Нажмите для чата с ИИ")
                    } else {
                        t(lang.get(), "Click to chat with AI", "Кликните для чата с ИИ")
                    }
                }}
            </div>
        </Show>

        <Show when=move || matches!(chat.phase.get(), ChatPhase::Opening | ChatPhase::Open)>
            <div class="fixed inset-0 z-30" on:click=move |_| chat.close()></div>
        </Show>

        <div class=window_class>
            <header class="flex items-center justify-between border-b border-gray-700 px-4 py-3">
                <span class="text-sm font-bold tracking-widest">
                    {move || t(lang.get(), "AI ASSISTANT", "ИИ-АССИСТЕНТ")}
                </span>
                <button
                    class="text-xs text-gray-400 hover:text-gray-200"
                    on:click=move |_| chat.close()
                >
                    {move || t(lang.get(), "CLOSE", "ЗАКРЫТЬ")}
                </button>
            </header>
            <Show when=move || chat.show_content.get()>
                <div class="relative flex-1 overflow-hidden">
                    <div
                        node_ref=transcript_ref
                        class="h-full overflow-y-auto px-4 py-3 [scrollbar-width:none]"
                    >
                        <Show when=move || chat.show_messages.get()>
                            <For
                                each=move || {
                                    chat.transcript().into_iter().enumerate().collect::<Vec<_>>()
                                }
                                key=|(i, _)| *i
                                let:entry
                            >
                                {
                                    let (_, message) = entry;
                                    let class = if message.role == Role::User {
                                        "my-1 ml-8 rounded-lg bg-teal-600/30 px-3 py-2 text-sm"
                                    } else {
                                        "my-1 mr-8 rounded-lg bg-gray-700/60 px-3 py-2 text-sm"
                                    };
                                    view! { <div class=class>{message.content}</div> }
                                }
                            </For>
                            <Show when=move || chat.waiting()>
                                <div class="my-1 mr-8 w-14 rounded-lg bg-gray-700/60 px-3 py-2 text-sm tracking-widest animate-pulse">
                                    "..."
                                </div>
                            </Show>
                        </Show>
                    </div>
                    <CustomScrollbar content=transcript_ref min_thumb=MIN_THUMB_CHAT_PX />
                </div>
                <form
                    class="flex gap-2 border-t border-gray-700 p-3"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <input
                        node_ref=input_ref
                        type="text"
                        class="min-w-0 flex-1 rounded-md border border-gray-700 bg-gray-800 px-3 \
                               py-2 text-sm focus:outline-none focus:ring-2 focus:ring-teal-500"
                        placeholder=move || t(
                            lang.get(),
                            "Type a message...",
                            "Введите сообщение...",
                        )
                    />
                    <button
                        type="submit"
                        class="rounded-md bg-teal-500 px-3 py-2 text-sm font-bold text-gray-900 \
                               disabled:opacity-50"
                        disabled=move || chat.waiting()
                    >
                        {move || t(lang.get(), "Send", "Отпр.")}
                    </button>
                </form>
            </Show>
        </div>
    }
}
