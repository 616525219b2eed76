#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use worktrack::db::db::Db;
    use worktrack::db::migrations::{get_db_version, init_with_migrations};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            MigrationTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'index') AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            > 0
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.temp_dir.path().join("worktrack.db")).unwrap();
        let conn = db.connection();

        assert_eq!(get_db_version(&conn).unwrap(), 2);
        for name in [
            "workdays",
            "work_sessions",
            "break_sessions",
            "idx_work_sessions_workday_id",
            "idx_break_sessions_workday_id",
            "idx_workdays_date",
        ] {
            assert!(table_exists(&conn, name), "{} is missing", name);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reopen_keeps_version(ctx: &mut MigrationTestContext) {
        let path = ctx.temp_dir.path().join("worktrack.db");
        drop(Db::open(&path).unwrap());
        let db = Db::open(&path).unwrap();
        assert_eq!(get_db_version(&db.connection()).unwrap(), 2);
    }

    #[test]
    fn test_migration_history() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_with_migrations(&mut conn).unwrap();

        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version").unwrap();
        let history: Vec<(u32, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(history, vec![(1, "create_tables".to_string()), (2, "create_indexes".to_string())]);
        drop(stmt);

        init_with_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 2);
    }

    #[test]
    fn test_empty_database_has_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_cascade_delete_removes_sessions() {
        let db = Db::in_memory().unwrap();
        let conn = db.connection();
        conn.execute("INSERT INTO workdays (id, date) VALUES ('d1', '2025-03-03')", []).unwrap();
        conn.execute(
            "INSERT INTO work_sessions (id, workday_id, started_at) VALUES ('s1', 'd1', '2025-03-03 09:00:00')",
            [],
        )
        .unwrap();
        conn.execute("DELETE FROM workdays WHERE id = 'd1'", []).unwrap();

        let left: i64 = conn.query_row("SELECT COUNT(*) FROM work_sessions", [], |row| row.get(0)).unwrap();
        assert_eq!(left, 0);
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        let db = Db::in_memory().unwrap();
        let conn = db.connection();
        conn.execute("INSERT INTO workdays (id, date) VALUES ('a', '2025-03-03')", []).unwrap();
        assert!(conn.execute("INSERT INTO workdays (id, date) VALUES ('b', '2025-03-03')", []).is_err());
    }
}
