use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use todo_manager::domain::todo::{CreateTodo, Todo, UpdateTodo};
use todo_manager::domain::user::Credentials;
use todo_manager::infrastructure::config::AppConfig;
use todo_manager::presentation::handlers::AppState;
use todo_manager::presentation::routes::configure;

macro_rules! setup_todo_test {
    () => {{
        let state = web::Data::new(AppState::in_memory(&AppConfig::default()));
        for (username, password) in [("alice", "pw1"), ("bob", "pw2")] {
            state
                .auth_service
                .register_user(Credentials::new(username, password))
                .await
                .unwrap();
        }
        test::init_service(App::new().app_data(state.clone()).configure(configure)).await
    }};
}

// Header credentials, the way the original browser client authenticated.
macro_rules! as_user {
    ($req:expr, $username:expr, $password:expr) => {
        $req.insert_header(("username", $username))
            .insert_header(("password", $password))
    };
}

macro_rules! create_todo {
    ($app:expr, $username:expr, $password:expr, $title:expr) => {{
        let req = as_user!(test::TestRequest::post().uri("/todos"), $username, $password)
            .set_json(&CreateTodo {
                title: $title.to_string(),
            })
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let todo: Todo = test::read_body_json(resp).await;
        todo
    }};
}

macro_rules! list_todos {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = as_user!(test::TestRequest::get().uri("/todos"), $username, $password)
            .to_request();
        let todos: Vec<Todo> = test::call_and_read_body_json(&$app, req).await;
        todos
    }};
}

macro_rules! update_todo {
    ($app:expr, $username:expr, $password:expr, $id:expr, $changes:expr) => {{
        let req = as_user!(
            test::TestRequest::put().uri(&format!("/todos/{}", $id)),
            $username,
            $password
        )
        .set_json(&$changes)
        .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! delete_todo {
    ($app:expr, $username:expr, $password:expr, $id:expr) => {{
        let req = as_user!(
            test::TestRequest::delete().uri(&format!("/todos/{}", $id)),
            $username,
            $password
        )
        .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn test_create_todo_returns_record() {
    let app = setup_todo_test!();

    let todo = create_todo!(app, "alice", "pw1", "buy milk");
    assert_eq!(
        todo,
        Todo {
            id: 1,
            user_id: 1,
            title: "buy milk".to_string(),
            completed: false,
        }
    );
}

#[actix_web::test]
async fn test_todo_routes_require_credentials() {
    let app = setup_todo_test!();

    let req = test::TestRequest::get().uri("/todos").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"message": "Authentication failed"}));

    let req = as_user!(test::TestRequest::post().uri("/todos"), "alice", "wrong")
        .set_json(&CreateTodo {
            title: "x".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The rejected create must not have reached the store.
    assert!(list_todos!(app, "alice", "pw1").is_empty());
}

#[actix_web::test]
async fn test_list_keeps_insertion_order() {
    let app = setup_todo_test!();

    for title in ["first", "second", "third"] {
        create_todo!(app, "alice", "pw1", title);
    }

    let titles: Vec<String> = list_todos!(app, "alice", "pw1")
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[actix_web::test]
async fn test_owner_isolation() {
    let app = setup_todo_test!();

    let alices = create_todo!(app, "alice", "pw1", "alice's");
    let bobs = create_todo!(app, "bob", "pw2", "bob's");
    assert_eq!(bobs.user_id, 2);

    let alice_list = list_todos!(app, "alice", "pw1");
    let bob_list = list_todos!(app, "bob", "pw2");
    assert_eq!(alice_list, vec![alices.clone()]);
    assert_eq!(bob_list, vec![bobs]);

    let resp = update_todo!(app, "bob", "pw2", alices.id, UpdateTodo::completed(true));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"message": "Todo not found"}));

    let resp = delete_todo!(app, "bob", "pw2", alices.id);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(list_todos!(app, "alice", "pw1"), vec![alices]);
}

#[actix_web::test]
async fn test_toggle_is_involutive() {
    let app = setup_todo_test!();
    let todo = create_todo!(app, "alice", "pw1", "x");

    let resp = update_todo!(app, "alice", "pw1", todo.id, UpdateTodo::completed(!todo.completed));
    let once: Todo = test::read_body_json(resp).await;
    assert!(once.completed);

    let resp = update_todo!(app, "alice", "pw1", todo.id, UpdateTodo::completed(!once.completed));
    let twice: Todo = test::read_body_json(resp).await;
    assert_eq!(twice, todo);
}

#[actix_web::test]
async fn test_partial_updates_leave_other_field() {
    let app = setup_todo_test!();
    let todo = create_todo!(app, "alice", "pw1", "buy milk");

    let resp = update_todo!(app, "alice", "pw1", todo.id, UpdateTodo::completed(true));
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = test::read_body_json(resp).await;
    assert_eq!(updated.title, "buy milk");

    let resp = update_todo!(app, "alice", "pw1", todo.id, UpdateTodo::title("buy oat milk"));
    let updated: Todo = test::read_body_json(resp).await;
    assert_eq!(updated.title, "buy oat milk");
    assert!(updated.completed);
}

#[actix_web::test]
async fn test_empty_title_update_is_ignored() {
    let app = setup_todo_test!();
    let todo = create_todo!(app, "alice", "pw1", "keep me");

    let resp = update_todo!(app, "alice", "pw1", todo.id, UpdateTodo::title(""));
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = test::read_body_json(resp).await;
    assert_eq!(updated.title, "keep me");
}

#[actix_web::test]
async fn test_delete_twice_is_not_found() {
    let app = setup_todo_test!();
    let todo = create_todo!(app, "alice", "pw1", "x");

    let resp = delete_todo!(app, "alice", "pw1", todo.id);
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"message": "Todo deleted successfully"}));

    let resp = delete_todo!(app, "alice", "pw1", todo.id);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = setup_todo_test!();

    let resp = delete_todo!(app, "alice", "pw1", 999);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = update_todo!(app, "alice", "pw1", "abc", UpdateTodo::completed(true));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = setup_todo_test!();
    create_todo!(app, "alice", "pw1", "one");
    let two = create_todo!(app, "alice", "pw1", "two");

    delete_todo!(app, "alice", "pw1", two.id);
    let three = create_todo!(app, "bob", "pw2", "three");
    assert_eq!(three.id, 3);
}

#[actix_web::test]
async fn test_title_is_stored_untrimmed() {
    let app = setup_todo_test!();
    let todo = create_todo!(app, "alice", "pw1", "  spaced  ");
    assert_eq!(todo.title, "  spaced  ");
}
