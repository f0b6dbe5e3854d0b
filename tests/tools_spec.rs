use std::sync::Arc;

use codesign_studio::capabilities::RecordingNotifier;
use codesign_studio::ids::{ItemId, SequentialAllocator};
use codesign_studio::models::*;
use codesign_studio::sync::MemoryGateway;
use codesign_studio::tools::*;
use speculate2::speculate;
use uuid::Uuid;

fn store<D: ToolDocument>() -> ToolStore<D> {
    ToolStore::new(
        Uuid::new_v4(),
        Arc::new(MemoryGateway::new()),
        Arc::new(SequentialAllocator::default()),
        Arc::new(RecordingNotifier::new()),
    )
}

fn texts<T>(items: &[T], text: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| text(i).to_string()).collect()
}

speculate! {
    describe "adding items" {
        it "ignores blank text" {
            let ideas: IdeasBoardStore = store();
            assert!(ideas.add_idea("   ", IdeaCategory::General, "#FFF9C4").is_none());
            assert!(ideas.add_idea("", IdeaCategory::General, "#FFF9C4").is_none());
            assert!(ideas.snapshot().ideas.is_empty());
            assert_eq!(ideas.snapshot(), IdeasBoard::default());
        }

        it "stores trimmed text and clears the draft" {
            let feedback: FeedbackStore = store();
            feedback.update_draft(|d| {
                d.text = "  Clear steps  ".to_string();
                d.kind = FeedbackKind::Wish;
            });
            let id = feedback.submit_draft().expect("item added");

            let doc = feedback.snapshot();
            assert_eq!(doc.items.len(), 1);
            assert_eq!(doc.items[0].id, id);
            assert_eq!(doc.items[0].text, "Clear steps");
            assert_eq!(doc.items[0].kind, FeedbackKind::Wish);
            assert_eq!(feedback.draft().text, "");
            assert_eq!(feedback.draft().kind, FeedbackKind::Wish);
        }

        it "allocates distinct ids" {
            let tree: ProblemTreeStore = store();
            let a = tree.add_cause("Slow load").expect("added");
            let b = tree.add_cause("Slow load").expect("added");
            assert_ne!(a, b);
        }
    }

    describe "removing items" {
        it "removes exactly one item and keeps the order of the rest" {
            let feedback: FeedbackStore = store();
            let a = feedback.add_item("a", FeedbackKind::Like).expect("added");
            let b = feedback.add_item("b", FeedbackKind::Like).expect("added");
            let c = feedback.add_item("c", FeedbackKind::Like).expect("added");

            assert!(feedback.remove_item(&b));

            let ids: Vec<ItemId> = feedback.snapshot().items.into_iter().map(|i| i.id).collect();
            assert_eq!(ids, vec![a, c]);
        }

        it "ignores unknown ids" {
            let feedback: FeedbackStore = store();
            feedback.add_item("a", FeedbackKind::Like);
            assert!(!feedback.remove_item(&ItemId::from("missing")));
            assert_eq!(feedback.snapshot().items.len(), 1);
        }

        it "removes empathy entries by position" {
            let map: EmpathyMapStore = store();
            map.add_entry(Quadrant::Says, "one");
            map.add_entry(Quadrant::Says, "two");
            map.add_entry(Quadrant::Says, "three");

            assert!(map.remove_entry(Quadrant::Says, 1));
            assert!(!map.remove_entry(Quadrant::Says, 5));
            assert_eq!(map.entries(Quadrant::Says), vec!["one", "three"]);
        }
    }

    describe "voting" {
        it "adds one vote per call" {
            let ideas: IdeasBoardStore = store();
            let id = ideas.add_idea("Dark mode", IdeaCategory::Future, "#BBDEFB").expect("added");

            assert_eq!(ideas.vote(&id), Some(1));
            assert_eq!(ideas.vote(&id), Some(2));
            assert_eq!(ideas.snapshot().ideas[0].votes, 2);
        }

        it "does nothing for an unknown id" {
            let ideas: IdeasBoardStore = store();
            ideas.add_idea("Dark mode", IdeaCategory::Future, "#BBDEFB");
            let before = ideas.snapshot();

            assert_eq!(ideas.vote(&ItemId::from("nope")), None);
            assert_eq!(ideas.snapshot(), before);
        }
    }

    describe "ranking ideas" {
        it "orders by votes with ties in insertion order" {
            let ideas: IdeasBoardStore = store();
            let a = ideas.add_idea("A", IdeaCategory::General, "#FFF9C4").expect("added");
            let _b = ideas.add_idea("B", IdeaCategory::General, "#FFF9C4").expect("added");
            let c = ideas.add_idea("C", IdeaCategory::MustHave, "#FFF9C4").expect("added");
            ideas.vote(&c);
            ideas.vote(&c);
            ideas.vote(&a);
            ideas.add_idea("D", IdeaCategory::General, "#FFF9C4");

            let ranked = ideas.ranked(IdeaFilter::All);
            assert_eq!(texts(&ranked, |i| i.text.as_str()), vec!["C", "A", "B", "D"]);
        }

        it "keeps insertion order between ideas with equal votes" {
            let ideas: IdeasBoardStore = store();
            let a = ideas.add_idea("A", IdeaCategory::General, "#FFF9C4").expect("added");
            let b = ideas.add_idea("B", IdeaCategory::General, "#FFF9C4").expect("added");
            let c = ideas.add_idea("C", IdeaCategory::General, "#FFF9C4").expect("added");
            for id in [&b, &c, &a, &c, &b, &a, &c] {
                ideas.vote(id);
            }

            let ranked = ideas.ranked(IdeaFilter::All);
            assert_eq!(texts(&ranked, |i| i.text.as_str()), vec!["C", "A", "B"]);
            assert_eq!(ranked.iter().map(|i| i.votes).collect::<Vec<_>>(), vec![3, 2, 2]);
        }

        it "filters without touching the board" {
            let ideas: IdeasBoardStore = store();
            ideas.add_idea("A", IdeaCategory::General, "#FFF9C4");
            ideas.add_idea("B", IdeaCategory::Future, "#FFF9C4");

            let future = ideas.ranked(IdeaFilter::Category(IdeaCategory::Future));
            assert_eq!(texts(&future, |i| i.text.as_str()), vec!["B"]);
            assert_eq!(ideas.snapshot().ideas.len(), 2);
        }
    }

    describe "expectations" {
        it "groups by kind in priority order, ties by insertion" {
            let exp: ExpectationsStore = store();
            exp.add_item("first medium", ExpectationKind::Goal, Priority::Medium);
            exp.add_item("a constraint", ExpectationKind::Constraint, Priority::High);
            exp.add_item("second medium", ExpectationKind::Goal, Priority::Medium);
            exp.add_item("urgent", ExpectationKind::Goal, Priority::High);

            let goals = exp.grouped(ExpectationKind::Goal);
            assert_eq!(
                texts(&goals, |i| i.text.as_str()),
                vec!["urgent", "first medium", "second medium"]
            );
            assert_eq!(exp.snapshot().items[0].text, "first medium");
        }

        it "summarises counts per kind" {
            let exp: ExpectationsStore = store();
            exp.add_item("g1", ExpectationKind::Goal, Priority::High);
            exp.add_item("g2", ExpectationKind::Goal, Priority::Low);
            exp.add_item("s1", ExpectationKind::Success, Priority::High);

            let summary = exp.summary();
            assert_eq!(summary[0], ExpectationSummary { kind: ExpectationKind::Goal, count: 2, high_priority: 1 });
            assert_eq!(summary[1].count, 0);
            assert_eq!(summary[2].high_priority, 1);
        }

        it "resets the draft priority after submitting" {
            let exp: ExpectationsStore = store();
            exp.update_draft(|d| {
                d.text = "Ship by June".to_string();
                d.kind = ExpectationKind::Constraint;
                d.priority = Priority::High;
            });
            exp.submit_draft().expect("added");

            let doc = exp.snapshot();
            let item = &doc.items[0];
            assert_eq!(item.kind, ExpectationKind::Constraint);
            assert_eq!(item.priority, Priority::High);
            assert_eq!(exp.draft().priority, Priority::Medium);
        }
    }

    describe "story map" {
        it "places each card after the others in its lane" {
            let map: StoryMapStore = store();
            map.add_item("Browse", StoryKind::Activity);
            map.add_item("Search", StoryKind::Task);
            map.add_item("Buy", StoryKind::Activity);

            let doc = map.snapshot();
            let placed: Vec<(String, u32, u32)> = doc
                .items
                .iter()
                .map(|i| (i.text.clone(), i.column, i.row))
                .collect();
            assert_eq!(
                placed,
                vec![
                    ("Browse".to_string(), 0, 0),
                    ("Search".to_string(), 0, 1),
                    ("Buy".to_string(), 1, 0),
                ]
            );
            assert_eq!(map.grid()[2].1.len(), 0);
        }
    }

    describe "problem tree" {
        it "keeps causes and effects apart" {
            let tree: ProblemTreeStore = store();
            tree.set_core_problem("Checkout drop-off");
            tree.update_draft(|d| d.effect = "Lost revenue".to_string());
            tree.add_cause("Slow page");
            tree.submit_draft(TreeNodeKind::Effect);

            assert_eq!(texts(&tree.causes(), |n| n.text.as_str()), vec!["Slow page"]);
            assert_eq!(texts(&tree.effects(), |n| n.text.as_str()), vec!["Lost revenue"]);
            assert_eq!(tree.draft().effect, "");
            assert_eq!(tree.snapshot().core_problem, "Checkout drop-off");
        }
    }
}
