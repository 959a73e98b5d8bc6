//! Property-based tests for paging and bookmark invariants.
//!
//! Tests validate:
//! 1. The current page never leaves [1, total]
//! 2. The prefetch window stays in range, excludes the page and is ordered by distance
//! 3. Bookmark upserts never duplicate a page

use mushaf::model::{PageBounds, PageStep, ReadingDirection, Side};
use mushaf::state::{prefetch_window, BookmarkStore, Navigator};
use mushaf::storage::MemoryStorage;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Move {
    GoTo(i64),
    Jump(i64),
    Step(bool),
    Toward(bool),
}

fn arb_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        (-50i64..700).prop_map(Move::GoTo),
        (-700i64..700).prop_map(Move::Jump),
        any::<bool>().prop_map(Move::Step),
        any::<bool>().prop_map(Move::Toward),
    ]
}

fn arb_direction() -> impl Strategy<Value = ReadingDirection> {
    prop_oneof![
        Just(ReadingDirection::LeftToRight),
        Just(ReadingDirection::RightToLeft),
    ]
}

// ===== Property 1: Navigation stays in bounds =====

proptest! {
    #[test]
    fn current_page_stays_in_bounds(
        total in 1u16..=700,
        direction in arb_direction(),
        moves in prop::collection::vec(arb_move(), 0..40),
    ) {
        let bounds = PageBounds::new(total).unwrap();
        let mut navigator = Navigator::new(bounds, bounds.first(), direction, 2);

        for mv in moves {
            let before = navigator.current();
            let transition = match mv {
                Move::GoTo(raw) => navigator.go_to(raw),
                Move::Jump(delta) => navigator.jump(delta),
                Move::Step(next) => {
                    navigator.step(if next { PageStep::Next } else { PageStep::Previous })
                }
                Move::Toward(right) => {
                    navigator.toward(if right { Side::Right } else { Side::Left })
                }
            };

            let page = navigator.current().get();
            prop_assert!(page >= 1 && page <= total);
            match transition {
                Some(t) => {
                    prop_assert_eq!(t.from, before);
                    prop_assert_eq!(t.to, navigator.current());
                }
                None => prop_assert_eq!(navigator.current(), before, "rejected moves keep the page"),
            }
        }
    }

    #[test]
    fn go_to_accepts_exactly_the_valid_range(raw in -1000i64..1000) {
        let bounds = PageBounds::default();
        let mut navigator =
            Navigator::new(bounds, bounds.first(), ReadingDirection::LeftToRight, 2);

        let accepted = navigator.go_to(raw).is_some();
        prop_assert_eq!(accepted, (1..=604).contains(&raw));
    }
}

// ===== Property 2: Prefetch window =====

proptest! {
    #[test]
    fn prefetch_window_is_in_range_and_nearest_first(
        total in 1u16..=700,
        page_seed in any::<u16>(),
        radius in 0u16..6,
    ) {
        let bounds = PageBounds::new(total).unwrap();
        let page = bounds.clamp(i64::from(page_seed % total) + 1);

        let window = prefetch_window(bounds, page, radius);

        let mut seen = std::collections::HashSet::new();
        let mut last_distance = 0;
        for candidate in &window {
            let distance = (i32::from(candidate.get()) - i32::from(page.get())).abs();
            prop_assert!(candidate.get() >= 1 && candidate.get() <= total);
            prop_assert!(distance >= 1 && distance <= i32::from(radius));
            prop_assert!(distance >= last_distance, "window must be ordered by distance");
            prop_assert!(seen.insert(candidate.get()), "duplicate page in window");
            last_distance = distance;
        }

        let expected = (1..=i64::from(radius))
            .flat_map(|d| [d, -d])
            .filter(|d| bounds.offset(page, *d).is_some())
            .count();
        prop_assert_eq!(window.len(), expected);
    }
}

// ===== Property 3: Bookmarks are unique per page =====

proptest! {
    #[test]
    fn bookmark_upserts_keep_pages_unique(
        pages in prop::collection::vec(1u16..=20, 0..30),
    ) {
        let store = BookmarkStore::new("quran_bookmarks");
        let mut storage = MemoryStorage::new();

        let mut first_seen: Vec<u16> = Vec::new();
        for page in pages {
            store.upsert(&mut storage, page, None, "1/1/2026").unwrap();
            if !first_seen.contains(&page) {
                first_seen.push(page);
            }
        }

        let listed: Vec<u16> = store.list(&storage).iter().map(|b| b.page).collect();
        prop_assert_eq!(listed, first_seen, "insertion order of first bookmark per page");
    }
}
