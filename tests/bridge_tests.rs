//! Visitor bridge: eligibility, dispatch order, failure isolation, and the
//! end-of-analysis summary

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use tola::ast::{CompilationUnit, NodeKind, NodeRef};
use tola::bridge::{
    BridgeOptions, Check, CheckContext, CheckFailure, CheckResult, RuleKey, VisitorBridge,
};

/// Whole-tree check that logs its invocations and reports one issue
struct TreeCheck {
    key: &'static str,
    needs_model: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl Check for TreeCheck {
    fn rule_key(&self) -> RuleKey {
        RuleKey::repo(self.key)
    }

    fn wants_semantic_model(&self) -> bool {
        self.needs_model
    }

    fn visit_tree(&mut self, ctx: &mut CheckContext<'_>) -> CheckResult {
        self.log.lock().unwrap().push(format!("{}:{}", self.key, ctx.file()));
        ctx.report_issue(self.rule_key(), sp(1), "tree visited");
        Ok(())
    }
}

/// Subscription check reporting one issue per matching node
struct NodeCheck {
    key: &'static str,
    kinds: Vec<NodeKind>,
}

impl Check for NodeCheck {
    fn rule_key(&self) -> RuleKey {
        RuleKey::repo(self.key)
    }

    fn nodes_to_visit(&self) -> Vec<NodeKind> {
        self.kinds.clone()
    }

    fn visit_node(&mut self, node: NodeRef<'_>, ctx: &mut CheckContext<'_>) -> CheckResult {
        ctx.report_issue(self.rule_key(), node.span(), "node visited");
        Ok(())
    }
}

/// Subscription check that always raises
struct BrokenCheck {
    key: &'static str,
}

impl Check for BrokenCheck {
    fn rule_key(&self) -> RuleKey {
        RuleKey::repo(self.key)
    }

    fn nodes_to_visit(&self) -> Vec<NodeKind> {
        vec![NodeKind::Class]
    }

    fn visit_node(&mut self, _node: NodeRef<'_>, _ctx: &mut CheckContext<'_>) -> CheckResult {
        Err(CheckFailure::new("BimBadaboum"))
    }
}

fn two_class_unit() -> CompilationUnit {
    unit(vec![
        ClassBuilder::new("First", 1, 10)
            .member(MethodBuilder::new("a", 2).build())
            .build(),
        ClassBuilder::new("Second", 12, 20)
            .member(MethodBuilder::new("b", 13).build())
            .build(),
    ])
}

#[test]
fn whole_tree_checks_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = VisitorBridge::new(
        vec![
            Box::new(TreeCheck { key: "S1", needs_model: false, log: Arc::clone(&log) }),
            Box::new(TreeCheck { key: "S2", needs_model: false, log: Arc::clone(&log) }),
        ],
        BridgeOptions::default(),
    );
    let tree = two_class_unit();
    bridge.visit_file("Foo.java", Some(&tree)).expect("no failure");
    assert_eq!(*log.lock().unwrap(), ["S1:Foo.java", "S2:Foo.java"]);
}

#[test]
fn model_dependent_checks_are_skipped_without_semantics() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = VisitorBridge::new(
        vec![
            Box::new(TreeCheck { key: "S1", needs_model: true, log: Arc::clone(&log) }),
            Box::new(TreeCheck { key: "S2", needs_model: false, log: Arc::clone(&log) }),
        ],
        BridgeOptions::default(),
    );
    let tree = two_class_unit();

    // Bootstrap path: no semantic model is attached, S1 must not run
    let issues = bridge.visit_file("java/lang/someFile.java", Some(&tree)).expect("ok");
    assert_eq!(*log.lock().unwrap(), ["S2:java/lang/someFile.java"]);
    assert_eq!(issues.len(), 1);

    // Ordinary path: both run
    log.lock().unwrap().clear();
    let issues = bridge.visit_file("org/foo/Foo.java", Some(&tree)).expect("ok");
    assert_eq!(*log.lock().unwrap(), ["S1:org/foo/Foo.java", "S2:org/foo/Foo.java"]);
    assert_eq!(issues.len(), 2);
}

#[test]
fn missing_tree_dispatches_nothing() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = VisitorBridge::new(
        vec![Box::new(TreeCheck { key: "S1", needs_model: false, log: Arc::clone(&log) })],
        BridgeOptions::default(),
    );
    let issues = bridge.visit_file("Broken.java", None).expect("ok");
    assert!(issues.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn failing_check_is_recorded_and_other_checks_continue() {
    let mut bridge = VisitorBridge::new(
        vec![
            Box::new(BrokenCheck { key: "S666" }),
            Box::new(NodeCheck { key: "S1", kinds: vec![NodeKind::Class] }),
        ],
        BridgeOptions::default(),
    );
    let tree = two_class_unit();

    let issues = bridge.visit_file("Foo.java", Some(&tree)).expect("isolated");
    // The healthy check still saw both classes
    assert_eq!(issues.len(), 2);
    // Exactly one error for the file, not one per node
    let errors = bridge.analysis_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule_key, RuleKey::repo("S666"));
    assert_eq!(errors[0].file, "Foo.java");
    assert_eq!(errors[0].message, "BimBadaboum");

    // The broken check runs again on the next file and fails again there
    let issues = bridge.visit_file("Bar.java", Some(&tree)).expect("isolated");
    assert_eq!(issues.len(), 2);
    assert_eq!(bridge.analysis_errors().len(), 2);
}

#[test]
fn fail_fast_propagates_and_records_nothing() {
    let mut bridge = VisitorBridge::new(
        vec![
            Box::new(BrokenCheck { key: "S666" }),
            Box::new(NodeCheck { key: "S1", kinds: vec![NodeKind::Class] }),
        ],
        BridgeOptions { fail_fast: true },
    );
    let tree = two_class_unit();
    let result = bridge.visit_file("Foo.java", Some(&tree));
    assert!(result.is_err());
    assert!(bridge.analysis_errors().is_empty());
}

#[test]
fn node_dispatch_follows_registration_order_per_node() {
    let mut bridge = VisitorBridge::new(
        vec![
            Box::new(NodeCheck { key: "S1", kinds: vec![NodeKind::Class] }),
            Box::new(NodeCheck { key: "S2", kinds: vec![NodeKind::Class] }),
        ],
        BridgeOptions::default(),
    );
    let tree = two_class_unit();
    let issues = bridge.visit_file("Foo.java", Some(&tree)).expect("ok");
    let keys: Vec<&str> = issues.iter().map(|i| i.rule_key.rule.as_str()).collect();
    // Per node: S1 then S2; nodes in pre-order
    assert_eq!(keys, ["S1", "S2", "S1", "S2"]);
}

fn unit_with_missing_classes(count: usize) -> CompilationUnit {
    let mut builder = ClassBuilder::new("Holder", 1, 200);
    for i in 0..count {
        builder = builder.member(field(tr(&format!("NotFound{:02}", i)), &format!("f{}", i), i + 2));
    }
    unit(vec![builder.build()])
}

#[test]
fn summary_lists_at_most_fifty_names_with_truncation_marker() {
    let mut bridge = VisitorBridge::new(Vec::new(), BridgeOptions::default());
    let tree = unit_with_missing_classes(60);
    bridge.visit_file("Foo.java", Some(&tree)).expect("ok");

    let summary = bridge.end_of_analysis().expect("aggregator non-empty");
    let expected: Vec<String> = (0..50).map(|i| format!("NotFound{:02}", i)).collect();
    assert_eq!(
        summary,
        format!("Classes not found during the analysis : [{}, ...]", expected.join(", "))
    );
}

#[test]
fn summary_below_the_cap_has_no_truncation_marker() {
    let mut bridge = VisitorBridge::new(Vec::new(), BridgeOptions::default());
    let tree = unit_with_missing_classes(3);
    bridge.visit_file("Foo.java", Some(&tree)).expect("ok");

    let summary = bridge.end_of_analysis().expect("aggregator non-empty");
    assert_eq!(
        summary,
        "Classes not found during the analysis : [NotFound00, NotFound01, NotFound02]"
    );
}

#[test]
fn summary_flushes_exactly_once() {
    let mut bridge = VisitorBridge::new(Vec::new(), BridgeOptions::default());
    let tree = unit_with_missing_classes(3);
    bridge.visit_file("Foo.java", Some(&tree)).expect("ok");

    assert!(bridge.end_of_analysis().is_some());
    assert!(bridge.end_of_analysis().is_none());
}

#[test]
fn summary_is_silent_when_everything_resolved() {
    let mut bridge = VisitorBridge::new(Vec::new(), BridgeOptions::default());
    let tree = two_class_unit();
    bridge.visit_file("Foo.java", Some(&tree)).expect("ok");
    assert!(bridge.end_of_analysis().is_none());
}

#[test]
fn suppressed_issues_never_leave_the_bridge() {
    // The reported issue sits inside a class annotated with its rule key
    let tree = unit(vec![ClassBuilder::new("First", 1, 10)
        .annotation(suppress(&["repo:S1"], 1))
        .member(MethodBuilder::new("a", 2).build())
        .build()]);
    let mut bridge = VisitorBridge::new(
        vec![Box::new(NodeCheck { key: "S1", kinds: vec![NodeKind::Class] })],
        BridgeOptions::default(),
    );
    let issues = bridge.visit_file("Foo.java", Some(&tree)).expect("ok");
    assert!(issues.is_empty());
}

#[test]
fn analyze_files_drains_every_tree_and_flushes_once() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = VisitorBridge::new(
        vec![Box::new(TreeCheck { key: "S1", needs_model: false, log: Arc::clone(&log) })],
        BridgeOptions::default(),
    );
    let first = two_class_unit();
    let second = unit_with_missing_classes(2);
    let issues = tola::analyze_files(
        &mut bridge,
        vec![
            ("A.java", Some(&first)),
            ("Broken.java", None),
            ("B.java", Some(&second)),
        ],
    )
    .expect("run completes");
    assert_eq!(issues.len(), 2);
    assert_eq!(*log.lock().unwrap(), ["S1:A.java", "S1:B.java"]);
    assert!(bridge.end_of_analysis().is_none(), "already flushed by analyze_files");
}
