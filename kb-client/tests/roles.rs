mod common;

use kb_client::PermissionMatrix;
use kb_client::access::Menu;

#[tokio::test]
async fn test_role_crud_refresh() {
    let backend = common::spawn().await;
    let client = common::logged_in(&backend).await;
    let roles = client.roles();
    let mut list = client.role_list();
    list.load().await.unwrap();

    let reviewer = list
        .mutate(roles.create("  reviewer ", " Reviews articles "))
        .await
        .unwrap();
    assert_eq!(reviewer.name, "reviewer");
    assert!(list.items().iter().any(|r| r.name == "reviewer"));

    let err = list.mutate(roles.update(reviewer.id, "", "x")).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter role name");

    list.mutate(roles.update(reviewer.id, "critic", "Critiques"))
        .await
        .unwrap();
    assert_eq!(roles.find_by_name("critic").await.unwrap().id, reviewer.id);

    list.mutate(roles.delete(reviewer.id)).await.unwrap();
    assert_eq!(list.items().len(), 2);
    assert_eq!(
        roles.find_by_name("critic").await.unwrap_err().to_string(),
        "Selected role not found"
    );
}

#[tokio::test]
async fn test_permission_matrix_full_replace() {
    let backend = common::spawn().await;
    let client = common::logged_in(&backend).await;
    let roles = client.roles();

    let matrix = PermissionMatrix::from_permissions(&roles.permissions().await.unwrap());
    let editor = roles.find_by_name("editor").await.unwrap();
    assert!(roles.role_permissions(editor.id).await.unwrap().is_empty());

    let mut checked = PermissionMatrix::checked_from_grants(
        &roles.role_permissions(editor.id).await.unwrap(),
    );
    checked.entry(Menu::Category).or_default().insert("view".into());
    checked.entry(Menu::Profile).or_default().insert("edit".into());

    let ids = matrix.permission_ids(&checked);
    let saved = roles.replace_role_permissions(editor.id, ids).await.unwrap();
    assert_eq!(saved.len(), 2);

    // a second save replaces rather than appends
    let only_dashboard = PermissionMatrix::checked_from_names(["view_dashboard"]);
    roles
        .replace_role_permissions(editor.id, matrix.permission_ids(&only_dashboard))
        .await
        .unwrap();
    let grants = roles.role_permissions(editor.id).await.unwrap();
    let names: Vec<_> = grants.iter().filter_map(|g| g.permission_name()).collect();
    assert_eq!(names, vec!["view_dashboard"]);

    let bodies = backend.with_state(|s| s.replaced.clone());
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].role_id, editor.id);
    assert_eq!(bodies[1].permission_id, vec![2]);
}
