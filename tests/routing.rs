//! Router behaviour through the public API.

use trie_router::routing::{Method, NodeKind};
use trie_router::{RequestContext, Router, RouterError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum H {
    Blog,
    Detail,
    Param,
    Wildcard,
}

fn blog_router() -> Router<H> {
    let mut router = Router::new();
    router.add_route("POST", "/blog", H::Blog).unwrap();
    router.add_route("POST", "/blog/detail", H::Detail).unwrap();
    router.add_route("POST", "/blog/:blogId", H::Param).unwrap();
    router.add_route("POST", "/user/*", H::Wildcard).unwrap();
    router
}

#[test]
fn test_end_to_end_scenario() {
    let router = blog_router();

    let mut ctx = RequestContext::new("POST", "/blog");
    assert_eq!(router.resolve("POST", "/blog", &mut ctx), Ok(&H::Blog));

    let mut ctx = RequestContext::new("POST", "/blog/detail");
    assert_eq!(router.resolve("POST", "/blog/detail", &mut ctx), Ok(&H::Detail));
    assert!(ctx.path_params.is_empty());

    let mut ctx = RequestContext::new("POST", "/blog/3333");
    assert_eq!(router.resolve("POST", "/blog/3333", &mut ctx), Ok(&H::Param));
    assert_eq!(ctx.param("blogId"), Some("3333"));

    let mut ctx = RequestContext::new("POST", "/user/checkout");
    assert_eq!(router.resolve("POST", "/user/checkout", &mut ctx), Ok(&H::Wildcard));
    assert!(ctx.path_params.is_empty());

    let mut ctx = RequestContext::new("GET", "/blog");
    assert!(matches!(
        router.resolve("GET", "/blog", &mut ctx),
        Err(RouterError::NotFound { .. })
    ));
}

#[test]
fn test_resolution_is_deterministic() {
    let router = blog_router();
    for _ in 0..100 {
        let mut ctx = RequestContext::new("POST", "/blog/42");
        assert_eq!(router.resolve("POST", "/blog/42", &mut ctx), Ok(&H::Param));
        assert_eq!(ctx.param("blogId"), Some("42"));
    }
}

#[test]
fn test_precedence_among_siblings() {
    let mut router = Router::new();
    router.add_route("GET", "/x/blog", H::Blog).unwrap();
    router.add_route("GET", "/x/*", H::Wildcard).unwrap();
    router.add_route("GET", "/x/:id", H::Param).unwrap();
    assert_eq!(router.tree(Method::Get).unwrap().children()[0].children().len(), 3);

    let mut ctx = RequestContext::new("GET", "/x/blog");
    assert_eq!(router.resolve("GET", "/x/blog", &mut ctx), Ok(&H::Blog));
    assert!(ctx.path_params.is_empty());

    let mut ctx = RequestContext::new("GET", "/x/42");
    assert_eq!(router.resolve("GET", "/x/42", &mut ctx), Ok(&H::Param));
    assert_eq!(ctx.param("id"), Some("42"));
}

#[test]
fn test_later_registrations_merge_by_precedence() {
    let mut router = Router::new();
    router.add_route("GET", "/a/:x/c", H::Param).unwrap();
    router.add_route("GET", "/a/b/d", H::Detail).unwrap();
    router.add_route("GET", "/a/*", H::Wildcard).unwrap();
    router.add_route("GET", "/a/*", H::Wildcard).unwrap();

    let a = &router.tree(Method::Get).unwrap().children()[0];
    assert_eq!(a.children().len(), 2);
    assert_eq!(a.children()[0].param_name(), Some("x"));
    assert_eq!(a.children()[0].children()[1].pattern(), "d");
    assert_eq!(a.children()[1].kind(), &NodeKind::Wildcard);

    let mut ctx = RequestContext::new("GET", "/a/b/c");
    assert_eq!(router.resolve("GET", "/a/b/c", &mut ctx), Ok(&H::Param));
    assert_eq!(ctx.param("x"), Some("b"));

    let mut ctx = RequestContext::new("GET", "/a/z/d");
    assert_eq!(router.resolve("GET", "/a/z/d", &mut ctx), Ok(&H::Detail));
    assert_eq!(ctx.param("x"), Some("z"));
}

#[test]
fn test_param_preferred_over_wildcard_when_no_static() {
    let mut router = Router::new();
    router.add_route("GET", "/x/*", H::Wildcard).unwrap();
    router.add_route("GET", "/x/:id", H::Param).unwrap();
    for segment in ["a", "blog", "123"] {
        let path = format!("/x/{segment}");
        assert_eq!(router.lookup("GET", &path).unwrap().handler, &H::Param);
    }
    // Only the wildcard accepts the literal marker.
    assert_eq!(router.lookup("GET", "/x/*").unwrap().handler, &H::Wildcard);
}

#[test]
fn test_idempotent_reregistration() {
    let mut router = Router::new();
    router.add_route("POST", "/blog", H::Blog).unwrap();
    router.add_route("POST", "/blog", H::Detail).unwrap();

    let root = router.tree(Method::Post).unwrap();
    let blogs: Vec<_> = root
        .children()
        .iter()
        .filter(|c| c.kind() == &NodeKind::Static("blog".into()))
        .collect();
    assert_eq!(blogs.len(), 1);

    let mut ctx = RequestContext::new("POST", "/blog");
    assert_eq!(router.resolve("POST", "/blog", &mut ctx), Ok(&H::Detail));
}

#[test]
fn test_interior_node_rejected() {
    let mut router = Router::new();
    router.add_route("GET", "/blog/detail", H::Detail).unwrap();
    assert_eq!(router.tree(Method::Get).unwrap().children()[0].pattern(), "blog");

    let mut ctx = RequestContext::new("GET", "/blog");
    assert_eq!(
        router.resolve("GET", "/blog", &mut ctx),
        Err(RouterError::NotFound {
            method: "GET".into(),
            path: "/blog".into(),
        })
    );
}

#[test]
fn test_wildcard_validity() {
    let mut router = Router::new();
    assert_eq!(
        router.add_route("POST", "/user/*/info", H::Wildcard),
        Err(RouterError::InvalidPattern("/user/*/info".into()))
    );
    assert_eq!(router.add_route("POST", "/user/*", H::Wildcard), Ok(()));
    let mut ctx = RequestContext::new("POST", "/user/anything");
    assert_eq!(router.resolve("POST", "/user/anything", &mut ctx), Ok(&H::Wildcard));
}

#[test]
fn test_unsupported_methods() {
    let mut router = blog_router();
    assert_eq!(
        router.add_route("OPTIONS", "/blog", H::Blog),
        Err(RouterError::UnsupportedMethod("OPTIONS".into()))
    );
    let mut ctx = RequestContext::new("HEAD", "/blog");
    assert_eq!(
        router.resolve("HEAD", "/blog", &mut ctx),
        Err(RouterError::UnsupportedMethod("HEAD".into()))
    );
}

#[test]
fn test_shared_across_threads() {
    let router = std::sync::Arc::new(blog_router());
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let router = router.clone();
            std::thread::spawn(move || {
                for n in 0..200 {
                    let id = format!("{i}-{n}");
                    let path = format!("/blog/{id}");
                    let mut ctx = RequestContext::new("POST", path.clone());
                    assert_eq!(router.resolve("POST", &path, &mut ctx), Ok(&H::Param));
                    assert_eq!(ctx.param("blogId"), Some(id.as_str()));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
}
