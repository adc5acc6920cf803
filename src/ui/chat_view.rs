use std::cell::{Cell, RefCell};
use std::rc::Rc;

use adw::prelude::*;
use gtk4 as gtk;

use climacare::api::models::WeatherSnapshot;
use climacare::chat::{ChatLog, ChatMessage, Sender};
use climacare::location;

use crate::ui::{AppContext, Page};

#[derive(Default)]
struct ChatState {
    log: ChatLog,
    weather: Option<WeatherSnapshot>,
}

fn message_row(message: &ChatMessage) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Vertical, 2);
    let text = gtk::Label::new(Some(&message.text));
    text.set_wrap(true);
    text.set_selectable(true);
    text.set_max_width_chars(60);
    let time = gtk::Label::new(Some(
        &message.timestamp.with_timezone(&chrono::Local).format("%H:%M").to_string(),
    ));
    time.add_css_class("caption");
    time.add_css_class("dim-label");
    let align = match message.sender {
        Sender::User => gtk::Align::End,
        Sender::Bot => gtk::Align::Start,
    };
    text.set_xalign(0.0);
    row.set_halign(align);
    time.set_halign(align);
    row.append(&text);
    row.append(&time);
    row
}

pub fn chat_page(ctx: &AppContext) -> Page {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
    root.set_margin_top(8);
    root.set_margin_bottom(8);
    root.set_margin_start(8);
    root.set_margin_end(8);

    let title = gtk::Label::new(Some("ClimaCare AI Chat"));
    title.add_css_class("title-3");
    title.set_halign(gtk::Align::Start);
    root.append(&title);
    let context_line = gtk::Label::new(None);
    context_line.add_css_class("dim-label");
    context_line.set_halign(gtk::Align::Start);
    context_line.set_visible(false);
    root.append(&context_line);

    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 10);
    let welcome = gtk::Label::new(Some(
        "Ask about staying healthy in today's weather.",
    ));
    welcome.add_css_class("dim-label");
    welcome.set_halign(gtk::Align::Start);
    messages_box.append(&welcome);
    scroller.set_child(Some(&messages_box));
    root.append(&scroller);

    let typing = gtk::Label::new(Some("ClimaCare AI is typing…"));
    typing.add_css_class("dim-label");
    typing.set_halign(gtk::Align::Start);
    typing.set_visible(false);
    root.append(&typing);

    // Input row
    let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let entry = gtk::Entry::new();
    entry.set_hexpand(true);
    entry.set_placeholder_text(Some("Ask a health question…"));
    let send_btn = gtk::Button::with_label("Send");
    send_btn.add_css_class("suggested-action");
    input_row.append(&entry);
    input_row.append(&send_btn);
    root.append(&input_row);

    let state = Rc::new(RefCell::new(ChatState::default()));
    let mounted = Rc::new(Cell::new(true));

    // Weather for context, once per page. Failures only mean no context.
    {
        let api = ctx.api.clone();
        let locator = ctx.locator.clone();
        let state = state.clone();
        let mounted = mounted.clone();
        let context_line = context_line.clone();
        crate::utils::run_async_to_main(
            async move {
                match location::acquire(locator.as_ref()).await {
                    Ok(coords) => api.fetch_weather(coords).await,
                    Err(e) => Err(e),
                }
            },
            move |res| {
                if !mounted.get() {
                    return;
                }
                match res {
                    Ok(w) => {
                        context_line.set_label(&format!("{} • {}°C • {}", w.location, w.temperature, w.condition));
                        context_line.set_visible(true);
                        state.borrow_mut().weather = Some(w);
                    }
                    Err(e) => log::info!("chat runs without weather context: {}", e),
                }
            },
        );
    }

    let append_row = {
        let messages_box = messages_box.clone();
        let scroller = scroller.clone();
        move |message: &ChatMessage| {
            messages_box.append(&message_row(message));
            let adj = scroller.vadjustment();
            adj.set_value(adj.upper());
        }
    };

    // Send actions
    let send: Rc<dyn Fn()> = {
        let api = ctx.api.clone();
        let entry = entry.clone();
        let send_btn = send_btn.clone();
        let state = state.clone();
        let mounted = mounted.clone();
        let typing = typing.clone();
        Rc::new(move || {
            let text = entry.text().trim().to_string();
            if text.is_empty() || typing.is_visible() {
                return;
            }
            entry.set_text("");
            append_row(state.borrow_mut().log.push_user(text.clone()));
            typing.set_visible(true);
            send_btn.set_sensitive(false);

            let weather = state.borrow().weather.clone();
            let api = api.clone();
            let state = state.clone();
            let mounted = mounted.clone();
            let typing = typing.clone();
            let send_btn = send_btn.clone();
            let append_row = append_row.clone();
            crate::utils::run_async_to_main(
                async move {
                    let location = weather.as_ref().map(|w| w.location.clone());
                    api.send_chat(&text, weather.as_ref(), location.as_deref()).await
                },
                move |reply| {
                    if !mounted.get() {
                        return;
                    }
                    typing.set_visible(false);
                    send_btn.set_sensitive(true);
                    append_row(state.borrow_mut().log.push_reply(reply));
                },
            );
        })
    };
    {
        let send = send.clone();
        send_btn.connect_clicked(move |_| (send)());
    }
    {
        let send = send.clone();
        entry.connect_activate(move |_| (send)());
    }

    Page::new(root).with_unmount(move || mounted.set(false))
}
