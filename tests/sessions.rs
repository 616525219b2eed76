#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use test_context::{test_context, TestContext};
    use uuid::Uuid;
    use worktrack::db::db::Db;
    use worktrack::db::sessions::{SessionKind, Sessions};
    use worktrack::db::store::{default_id_generator, SessionStore, SqliteStore};

    struct SessionTestContext {
        store: SqliteStore,
        workday_id: Uuid,
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let store = SqliteStore::new(Db::in_memory().unwrap());
            let workday_id = store.ensure_work_day(day(), 8.0).unwrap().id;
            SessionTestContext { store, workday_id }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_and_end_work_session(ctx: &mut SessionTestContext) {
        let session = ctx.store.start_work_session(ctx.workday_id, at(9, 0)).unwrap();
        assert!(session.is_active());
        assert!(ctx.store.has_active_work_session(ctx.workday_id).unwrap());

        ctx.store.end_active_work_session(ctx.workday_id, at(10, 30)).unwrap();
        let sessions = ctx.store.fetch_sessions(ctx.workday_id).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, session.id);
        assert_eq!(sessions[0].ended_at, Some(at(10, 30)));
        assert_eq!(sessions[0].duration(at(23, 0)), Duration::minutes(90));
        assert!(!ctx.store.has_active_work_session(ctx.workday_id).unwrap());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_starting_closes_previous_session(ctx: &mut SessionTestContext) {
        ctx.store.start_work_session(ctx.workday_id, at(9, 0)).unwrap();
        ctx.store.start_work_session(ctx.workday_id, at(11, 0)).unwrap();

        let sessions = ctx.store.fetch_sessions(ctx.workday_id).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].ended_at, Some(at(11, 0)));
        assert!(sessions[1].is_active());
        assert_eq!(sessions.iter().filter(|s| s.is_active()).count(), 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_end_never_precedes_start(ctx: &mut SessionTestContext) {
        ctx.store.start_break_session(ctx.workday_id, at(12, 0)).unwrap();
        ctx.store.end_active_break_session(ctx.workday_id, at(11, 0)).unwrap();

        let breaks = ctx.store.fetch_breaks(ctx.workday_id).unwrap();
        assert_eq!(breaks[0].ended_at, Some(at(12, 0)));
        assert_eq!(breaks[0].duration(at(13, 0)), Duration::zero());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_end_without_active_session_is_noop(ctx: &mut SessionTestContext) {
        ctx.store.end_active_work_session(ctx.workday_id, at(9, 0)).unwrap();
        ctx.store.end_active_break_session(ctx.workday_id, at(9, 0)).unwrap();
        assert!(ctx.store.fetch_sessions(ctx.workday_id).unwrap().is_empty());
        assert!(ctx.store.fetch_breaks(ctx.workday_id).unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_work_and_break_tables_are_separate(ctx: &mut SessionTestContext) {
        ctx.store.start_work_session(ctx.workday_id, at(9, 0)).unwrap();
        ctx.store.start_break_session(ctx.workday_id, at(10, 0)).unwrap();

        assert_eq!(ctx.store.fetch_sessions(ctx.workday_id).unwrap().len(), 1);
        assert_eq!(ctx.store.fetch_breaks(ctx.workday_id).unwrap().len(), 1);
        // Starting a break does not close work; the tracker does that explicitly.
        assert!(ctx.store.has_active_work_session(ctx.workday_id).unwrap());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_sessions_are_ordered_by_start(ctx: &mut SessionTestContext) {
        let sessions = Sessions::new(ctx.store.db().clone(), SessionKind::Work, default_id_generator());
        sessions.start(ctx.workday_id, at(14, 0)).unwrap();
        sessions.end_active(ctx.workday_id, at(15, 0)).unwrap();
        sessions.start(ctx.workday_id, at(8, 0)).unwrap();

        let fetched = sessions.fetch(ctx.workday_id).unwrap();
        assert_eq!(fetched[0].started_at, at(8, 0));
        assert_eq!(fetched[1].started_at, at(14, 0));
        assert_eq!(sessions.fetch_active(ctx.workday_id).unwrap().unwrap().started_at, at(8, 0));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_end_active_reports_whether_closed(ctx: &mut SessionTestContext) {
        let breaks = Sessions::new(ctx.store.db().clone(), SessionKind::Break, default_id_generator());
        assert!(!breaks.end_active(ctx.workday_id, at(9, 0)).unwrap());
        breaks.start(ctx.workday_id, at(9, 0)).unwrap();
        assert!(breaks.end_active(ctx.workday_id, at(9, 15)).unwrap());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_unknown_workday_is_rejected(ctx: &mut SessionTestContext) {
        assert!(ctx.store.start_work_session(Uuid::new_v4(), at(9, 0)).is_err());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_summary_loads_both_kinds(ctx: &mut SessionTestContext) {
        ctx.store.start_work_session(ctx.workday_id, at(9, 0)).unwrap();
        ctx.store.end_active_work_session(ctx.workday_id, at(12, 0)).unwrap();
        ctx.store.start_break_session(ctx.workday_id, at(12, 0)).unwrap();

        let summary = ctx.store.daily_summary(day()).unwrap().unwrap();
        assert_eq!(summary.work_day.id, ctx.workday_id);
        assert_eq!(summary.sessions.len(), 1);
        assert_eq!(summary.breaks.len(), 1);
        assert!(summary.is_on_break());
    }
}
