//! End-to-end interaction flows through the composition root

use anyhow::Result;
use libmurmur::store::media::OnFinish;
use libmurmur::store::{AppStores, ModalState};
use libmurmur::types::{CommentId, MediaItem, MediaKind, MenuPosition, PostId, PremiumFeature, PressEvent, SessionUser};
use libmurmur::validation::forms::composer;
use libmurmur::Config;
use std::cell::RefCell;
use std::rc::Rc;

fn stores() -> Result<AppStores> {
    Ok(AppStores::from_config(&Config::default())?)
}

fn photo(id: &str) -> MediaItem {
    MediaItem::new(id, format!("file:///photos/{}.jpg", id), MediaKind::Image)
}

#[test]
fn test_media_reopen_keeps_selection() -> Result<()> {
    let stores = stores()?;
    let media = stores.media();

    media.open();
    media.set_selection(vec![photo("a"), photo("b")]);
    media.close();
    media.open();

    assert!(media.media_open().get());
    assert_eq!(media.media_result().get(), vec![photo("a"), photo("b")]);
    Ok(())
}

#[test]
fn test_media_completion_flow() -> Result<()> {
    let stores = stores()?;
    let media = stores.media();
    let delivered = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&delivered);
    media.set_on_finish(OnFinish::new(move |items| {
        sink.borrow_mut().extend(items.iter().map(|i| i.id.clone()))
    }));
    media.open();
    media.set_selection(vec![photo("x")]);

    // The presentation layer closes the picker and completes the session.
    media.close();
    if let Some(callback) = media.take_on_finish() {
        callback.call(&media.selection());
    }
    assert!(media.take_on_finish().is_none());

    assert_eq!(*delivered.borrow(), vec!["x".to_string()]);
    Ok(())
}

#[test]
fn test_context_menu_position() -> Result<()> {
    let stores = stores()?;
    let menu = stores.context_menu();

    menu.on_long_press(PressEvent::new(120.0, 20.0)?);

    assert!(menu.is_visible());
    assert_eq!(menu.position(), MenuPosition { x: 0.0, y: 100.0 });
    Ok(())
}

#[test]
fn test_malformed_press_is_rejected_at_the_boundary() {
    assert!(PressEvent::new(f64::NAN, 20.0).is_err());
}

#[test]
fn test_post_delete_retarget() -> Result<()> {
    let stores = stores()?;
    let post = stores.post();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let _sub = post
        .delete_modal()
        .subscribe(move |state: &ModalState<PostId>| sink.borrow_mut().push(state.clone()));

    post.open_delete(PostId::from("A"));
    post.open_delete(PostId::from("B"));

    let state = post.delete_modal().get();
    assert!(state.open);
    assert_eq!(state.target, Some(PostId::from("B")));
    assert!(seen.borrow().iter().all(|s| s.open && s.target.is_some()));

    let notice = post
        .delete_notice(stores.localizer())
        .expect("modal is open");
    assert_eq!(notice.message, "Post B will be removed for everyone.");
    Ok(())
}

#[test]
fn test_composer_submit_gate() -> Result<()> {
    let stores = stores()?;
    let post = stores.post();

    post.open_composer();
    post.composer().set_value(composer::TITLE, "ab")?;
    assert!(!post.can_submit());
    assert_eq!(
        post.composer().errors().get(composer::TITLE).map(String::as_str),
        Some("Must be at least 3 characters")
    );

    post.composer().set_value(composer::TITLE, "abc")?;
    assert!(post.can_submit());
    assert!(post.validate_for_submit());

    post.close_composer();
    assert_eq!(post.composer().value(composer::TITLE)?, "");
    Ok(())
}

#[test]
fn test_can_submit_fresh_while_composer_closes() -> Result<()> {
    let stores = Rc::new(stores()?);
    let post = stores.post();
    post.open_composer();
    post.composer().set_value(composer::TITLE, "ab")?;
    assert!(!post.can_submit());

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let reader = Rc::downgrade(&stores);
    let _sub = post.composer_open().subscribe(move |_| {
        if let Some(stores) = reader.upgrade() {
            *sink.borrow_mut() = Some(stores.post().can_submit());
        }
    });

    post.close_composer();
    assert_eq!(*seen.borrow(), Some(true));
    assert!(post.can_submit());
    Ok(())
}

#[test]
fn test_gate_consistent_during_sign_out() -> Result<()> {
    let stores = Rc::new(stores()?);
    stores.session().sign_in(SessionUser {
        id: "u1".to_string(),
        handle: "ada".to_string(),
    });
    stores.subscription().set_premium(true);
    assert!(!stores.subscription().gated());

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let reader = Rc::downgrade(&stores);
    let _sub = stores.session().user().subscribe(move |_| {
        if let Some(stores) = reader.upgrade() {
            let subscription = stores.subscription();
            *sink.borrow_mut() = Some((subscription.is_premium(), subscription.gated()));
        }
    });

    stores.sign_out();
    assert_eq!(*seen.borrow(), Some((false, true)));
    Ok(())
}

#[test]
fn test_comment_flow() -> Result<()> {
    let stores = stores()?;
    let comment = stores.comment();

    comment.open_options(CommentId::from("c1"));
    comment.reply_to(CommentId::from("c1"));
    comment.close_options();

    assert!(!comment.is_options_open());
    assert_eq!(comment.reply_target().get(), Some(CommentId::from("c1")));
    Ok(())
}

#[test]
fn test_paywall_until_premium() -> Result<()> {
    let stores = stores()?;
    let subscription = stores.subscription();

    assert!(!subscription.request(PremiumFeature::LongVideo));
    let notice = subscription
        .paywall_notice(stores.localizer())
        .expect("paywall is open");
    assert_eq!(notice.title, "Go premium");

    subscription.set_premium(true);
    assert!(!subscription.is_paywall_open());
    assert!(subscription.request(PremiumFeature::LongVideo));
    Ok(())
}

#[test]
fn test_roots_do_not_share_state() -> Result<()> {
    let first = stores()?;
    let second = stores()?;

    first.context_menu().on_long_press(PressEvent::new(40.0, 10.0)?);
    first.subscription().set_premium(true);

    assert!(!second.context_menu().is_visible());
    assert!(!second.subscription().is_premium());
    Ok(())
}
