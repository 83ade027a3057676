#![allow(dead_code)]

use converge_core::artifact::{ArtifactCoordinate, Scope};
use converge_core::tree::{DependencyTree, NodeId};

pub fn compile(group: &str, artifact: &str, version: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new(group, artifact, version).with_scope(Scope::Compile)
}

pub fn project() -> DependencyTree {
    DependencyTree::new(ArtifactCoordinate::new("com.example", "app", "1.0"))
}

/// Handles into the trees built below.
pub struct Fixture {
    pub tree: DependencyTree,
    pub first: NodeId,
    pub second: NodeId,
}

/// app
/// ├─ org.a:lib-a:1.0
/// │  └─ org.slf4j:slf4j-api:<first>
/// └─ org.b:lib-b:1.0
///    └─ org.slf4j:slf4j-api:<second>
pub fn slf4j_tree(first: ArtifactCoordinate, second: ArtifactCoordinate) -> Fixture {
    let mut tree = project();
    let root = tree.root();
    let a = tree.add_child(root, compile("org.a", "lib-a", "1.0"));
    let first = tree.add_child(a, first);
    let b = tree.add_child(root, compile("org.b", "lib-b", "1.0"));
    let second = tree.add_child(b, second);
    Fixture {
        tree,
        first,
        second,
    }
}

/// Two slf4j-api nodes at 1.7.30 and 1.7.32, both compile scope.
pub fn diverging_slf4j() -> Fixture {
    slf4j_tree(
        compile("org.slf4j", "slf4j-api", "1.7.30"),
        compile("org.slf4j", "slf4j-api", "1.7.32"),
    )
}

/// Two jackson-databind nodes, both at 2.12.6.1, reached through different parents.
pub fn identical_jackson() -> DependencyTree {
    let mut tree = project();
    let root = tree.root();
    let web = tree.add_child(root, compile("org.web", "web-kit", "3.1"));
    tree.add_child(
        web,
        compile("com.fasterxml.jackson.core", "jackson-databind", "2.12.6.1"),
    );
    let client = tree.add_child(root, compile("org.client", "client", "0.9"));
    tree.add_child(
        client,
        compile("com.fasterxml.jackson.core", "jackson-databind", "2.12.6.1"),
    );
    tree
}

/// Both conflicts at once, plus converging and filtered-out noise.
pub fn mixed_tree() -> DependencyTree {
    let mut tree = project();
    let root = tree.root();

    let web = tree.add_child(root, compile("org.web", "web-kit", "3.1"));
    tree.add_child(web, compile("org.slf4j", "slf4j-api", "1.7.32"));
    tree.add_child(
        web,
        compile("com.fasterxml.jackson.core", "jackson-databind", "2.12.6.1"),
    );
    tree.add_child(web, compile("com.google.guava", "guava", "31.0-jre"));

    let client = tree.add_child(root, compile("org.client", "client", "0.9"));
    tree.add_child(client, compile("org.slf4j", "slf4j-api", "1.7.30"));
    tree.add_child(
        client,
        compile("com.fasterxml.jackson.core", "jackson-databind", "2.12.6.1"),
    );
    tree.add_child(client, compile("com.google.guava", "guava", "31.0-jre"));

    let junit = tree.add_child(
        root,
        ArtifactCoordinate::new("junit", "junit", "4.13.2").with_scope(Scope::Test),
    );
    tree.add_child(
        junit,
        ArtifactCoordinate::new("org.hamcrest", "hamcrest-core", "1.3").with_scope(Scope::Test),
    );
    tree.add_child(
        root,
        ArtifactCoordinate::new("org.hamcrest", "hamcrest-core", "2.2").with_scope(Scope::Test),
    );
    tree.add_child(
        root,
        compile("com.google.guava", "guava", "30.0-jre").with_optional(true),
    );
    tree
}

/// app
/// ├─ <parent>
/// │  └─ org.slf4j:slf4j-api:1.7.30
/// ├─ org.b:lib-b:1.0
/// │  └─ org.slf4j:slf4j-api:1.7.32
/// └─ org.c:lib-c:1.0
///    └─ org.slf4j:slf4j-api:1.7.31
pub fn slf4j_beneath(parent: ArtifactCoordinate) -> DependencyTree {
    let mut tree = project();
    let root = tree.root();
    let hidden = tree.add_child(root, parent);
    tree.add_child(hidden, compile("org.slf4j", "slf4j-api", "1.7.30"));
    let b = tree.add_child(root, compile("org.b", "lib-b", "1.0"));
    tree.add_child(b, compile("org.slf4j", "slf4j-api", "1.7.32"));
    let c = tree.add_child(root, compile("org.c", "lib-c", "1.0"));
    tree.add_child(c, compile("org.slf4j", "slf4j-api", "1.7.31"));
    tree
}
