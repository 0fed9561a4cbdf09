use squares_core::db::open_db_in_memory;
use squares_core::{Coordinate, PointRepository, RepoError, SqlitePointRepository};

#[test]
fn add_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let point = repo.add_point(Coordinate::new(-3, 7)).unwrap();
    assert!(point.id > 0);

    let loaded = repo.get_point(point.id).unwrap().unwrap();
    assert_eq!(loaded, point);
    assert_eq!(loaded.coordinate(), Coordinate::new(-3, 7));
}

#[test]
fn get_missing_point_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    assert!(repo.get_point(42).unwrap().is_none());
}

#[test]
fn list_points_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let a = repo.add_point(Coordinate::new(5, 5)).unwrap();
    let b = repo.add_point(Coordinate::new(0, 0)).unwrap();
    let c = repo.add_point(Coordinate::new(-1, 2)).unwrap();

    let ids: Vec<i64> = repo.list_points().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn exists_honours_exclude_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let point = repo.add_point(Coordinate::new(1, 2)).unwrap();
    assert!(repo.exists(1, 2, None).unwrap());
    assert!(!repo.exists(1, 2, Some(point.id)).unwrap());
    assert!(!repo.exists(2, 1, None).unwrap());
}

#[test]
fn add_points_assigns_ids_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let inserted = repo
        .add_points(&[Coordinate::new(0, 0), Coordinate::new(0, 1)])
        .unwrap();
    assert_eq!(inserted.len(), 2);
    assert!(inserted[0].id < inserted[1].id);
    assert_eq!(repo.list_points().unwrap(), inserted);
}

#[test]
fn add_points_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();
    repo.add_point(Coordinate::new(9, 9)).unwrap();

    let err = repo
        .add_points(&[Coordinate::new(1, 1), Coordinate::new(9, 9)])
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let remaining = repo.list_points().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(!repo.exists(1, 1, None).unwrap());
}

#[test]
fn update_keeps_id_and_changes_coordinates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let point = repo.add_point(Coordinate::new(0, 0)).unwrap();
    repo.update_point(point.id, Coordinate::new(4, -4)).unwrap();

    let loaded = repo.get_point(point.id).unwrap().unwrap();
    assert_eq!(loaded.id, point.id);
    assert_eq!(loaded.coordinate(), Coordinate::new(4, -4));
}

#[test]
fn update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let update_err = repo.update_point(77, Coordinate::new(1, 1)).unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound(77)));

    let delete_err = repo.delete_point(77).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(77)));
}

#[test]
fn delete_removes_point() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let point = repo.add_point(Coordinate::new(2, 3)).unwrap();
    repo.delete_point(point.id).unwrap();

    assert!(repo.get_point(point.id).unwrap().is_none());
    assert!(!repo.exists(2, 3, None).unwrap());
}

#[test]
fn out_of_range_persisted_coordinate_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO points (x, y) VALUES (?1, 0);",
        [i64::from(i32::MAX) + 1],
    )
    .unwrap();
    let repo = SqlitePointRepository::try_new(&conn).unwrap();

    let err = repo.list_points().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
