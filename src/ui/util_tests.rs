#![allow(clippy::unwrap_used)]

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate("Alipay", 10), "Alipay");
    assert_eq!(truncate("Alipay", 6), "Alipay");
    assert_eq!(truncate("", 4), "");
}

#[test]
fn test_truncate_adds_ellipsis() {
    assert_eq!(truncate("Money Market Fund", 8), "Money M…");
    assert_eq!(truncate("Car", 1), "…");
    assert_eq!(truncate("Car", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("银行活期存款", 4), "银行活…");
    assert_eq!(truncate("支付宝", 3), "支付宝");
}

// ── scrolling ────────────────────────────────────────────────

#[test]
fn test_scroll_down_follows_cursor() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..4 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 4);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 5);
    assert_eq!(index, 2);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (4, 4));

    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_jumps() {
    let (mut index, mut scroll) = (3, 1);
    scroll_to_bottom(&mut index, &mut scroll, 12, 5);
    assert_eq!((index, scroll), (11, 7));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    // Empty list leaves the cursor alone
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}
