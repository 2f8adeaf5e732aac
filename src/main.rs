use bindery::bootstrap::Bootstrapper;
use bindery::headers::HeaderStore;
use bindery::module::{Module, RouteEntry, StaticModuleCatalog};
use http::Method;

#[derive(Default)]
struct PetsModule;

impl Module for PetsModule {
    fn name(&self) -> &str {
        "pets"
    }

    fn routes(&self) -> Vec<RouteEntry> {
        vec![
            RouteEntry::get("/pets", "list_pets"),
            RouteEntry::post("/pets", "add_pet"),
            RouteEntry::get("/pets/{id}", "get_pet"),
            RouteEntry::delete("/pets/{id}", "remove_pet"),
        ]
    }
}

#[derive(Default)]
struct UsersModule;

impl Module for UsersModule {
    fn name(&self) -> &str {
        "users"
    }

    fn routes(&self) -> Vec<RouteEntry> {
        vec![
            RouteEntry::get("/users", "list_users"),
            RouteEntry::get("/users/{id}", "get_user"),
            RouteEntry::get("/users/{id}/posts", "list_user_posts"),
            RouteEntry::get("/users/{id}/posts/{post_id}", "get_post"),
        ]
    }
}

fn main() -> anyhow::Result<()> {
    bindery::telemetry::init_logging()?;

    let catalog = StaticModuleCatalog::new()
        .with::<PetsModule>()
        .with::<UsersModule>();
    let bootstrapper = Bootstrapper::new(catalog).boot()?;

    let table = bootstrapper.route_cache()?;
    table.dump();

    let resolver = bootstrapper
        .container()
        .ok_or_else(|| anyhow::anyhow!("container missing after boot"))?
        .route_resolver()?;

    let tests = vec![
        (Method::GET, "/pets", "list_pets"),
        (Method::POST, "/pets", "add_pet"),
        (Method::GET, "/pets/42", "get_pet"),
        (Method::DELETE, "/pets/42", "remove_pet"),
        (Method::GET, "/users", "list_users"),
        (Method::GET, "/users/99", "get_user"),
        (Method::GET, "/users/99/posts", "list_user_posts"),
        (Method::GET, "/users/99/posts/abc", "get_post"),
        (Method::GET, "/does/not/exist", "<none>"),
    ];

    for (method, path, expected) in tests {
        match resolver.resolve(method.clone(), path, &table) {
            Some(resolved) => {
                println!(
                    "✅ {} {} → handler: {} | module: {} | params: {:?}",
                    method, path, resolved.handler_name, resolved.module, resolved.path_params
                );
                assert_eq!(resolved.handler_name, expected);
            }
            None => {
                println!("❌ {} {} → no match (expected: {})", method, path, expected);
                assert_eq!(expected, "<none>");
            }
        }
    }

    for key in bootstrapper.module_keys().cloned().collect::<Vec<_>>() {
        let module = bootstrapper.module_by_key(&key)?;
        println!("📦 {} → {}", key, module.name());
    }
    println!("📦 total modules: {}", bootstrapper.all_modules()?.len());

    let headers = HeaderStore::from_pairs([
        ("Accept", "application/json"),
        ("Accept", "text/html;q=0.9"),
        ("Content-Length", "128"),
        ("Cookie", "session=abc123; theme=dark"),
    ]);
    println!(
        "🔎 accept={:?} content_length={} cookies={:?}",
        headers.accept(),
        headers.content_length()?,
        headers.cookies().collect::<Vec<_>>()
    );

    Ok(())
}
