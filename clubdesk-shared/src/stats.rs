/// Dashboard statistics aggregator
///
/// Gathers every figure the admin dashboard shows in one call: global
/// counts, time-windowed activity, per-status and per-club match
/// breakdowns, six-month trend histograms, and the top clubs by member
/// count.
///
/// # Basic counts
///
/// Global counts are fetched through the `get_basic_counts` SQL function
/// when the instance has it installed. When the call fails (most commonly
/// SQLSTATE 42883 on instances without the function migration), the
/// aggregator falls back to five concurrent `COUNT(*)` queries and the
/// caller never sees the difference.
///
/// # Trend histograms
///
/// The `usersByMonth` and `matchesByMonth` series always contain exactly
/// six entries in chronological order ending with the current month.
/// Months with no rows appear with a count of zero. Labels use French
/// short month names ("janv. 2026"), which is what the dashboard charts
/// render directly.

use chrono::{DateTime, Datelike, Locale, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    club::Club, match_record::Match, match_record::MatchParticipant,
    membership::ClubMembership, profile::Profile,
};

/// Number of months covered by the trend histograms, current month included
const TREND_MONTHS: u32 = 6;

/// Number of clubs in the top-clubs ranking
const TOP_CLUBS_LIMIT: i64 = 5;

/// Errors from statistics gathering
#[derive(Debug, Error)]
pub enum StatsError {
    /// A statistics query failed
    #[error("failed to gather statistics: {0}")]
    Database(#[from] sqlx::Error),
}

/// Matches grouped by lifecycle status
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StatusCount {
    /// Match status label
    pub status: String,

    /// Number of matches with this status
    pub count: i64,
}

/// Matches grouped by hosting club
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClubCount {
    /// Club name
    pub club_name: String,

    /// Number of matches hosted
    pub count: i64,
}

/// One month of a trend histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// French short-form label, e.g. "janv. 2026"
    pub month: String,

    /// Rows created during that month
    pub count: i64,
}

/// One entry of the top-clubs ranking
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopClub {
    /// Club name
    pub club_name: String,

    /// Current member count
    pub member_count: i32,
}

/// The complete dashboard payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Total registered users
    pub total_users: i64,

    /// Total clubs
    pub total_clubs: i64,

    /// Total matches ever created
    pub total_matches: i64,

    /// Total club memberships
    pub total_members: i64,

    /// Total match participations
    pub total_participants: i64,

    /// Matches created since the start of the current month
    pub matches_this_month: i64,

    /// Matches created since the most recent Sunday
    pub matches_this_week: i64,

    /// Users registered since the start of the current month
    pub new_users_this_month: i64,

    /// Matches grouped by status
    pub matches_by_status: Vec<StatusCount>,

    /// Matches grouped by hosting club
    pub matches_by_club: Vec<ClubCount>,

    /// User registrations per month over the last six months
    pub users_by_month: Vec<MonthCount>,

    /// Match creations per month over the last six months
    pub matches_by_month: Vec<MonthCount>,

    /// Mean participants per match, rounded to one decimal (0 with no matches)
    pub average_participants_per_match: f64,

    /// Up to five clubs ranked by member count
    pub top_clubs_by_members: Vec<TopClub>,
}

/// Global row counts across the five core tables
#[derive(Debug, Clone, sqlx::FromRow)]
struct BasicCounts {
    total_users: i64,
    total_clubs: i64,
    total_matches: i64,
    total_members: i64,
    total_participants: i64,
}

/// Gathers the full statistics payload
///
/// The five independent query groups run concurrently; a failure in any
/// of them fails the whole gather.
pub async fn gather(pool: &PgPool) -> Result<Statistics, StatsError> {
    let now = Utc::now();

    let (basic, time_based, match_stats, club_stats, trends) = tokio::try_join!(
        basic_counts(pool),
        time_based_counts(pool, now),
        match_breakdown(pool),
        club_breakdown(pool),
        trend_histograms(pool, now),
    )?;

    Ok(Statistics {
        total_users: basic.total_users,
        total_clubs: basic.total_clubs,
        total_matches: basic.total_matches,
        total_members: basic.total_members,
        total_participants: basic.total_participants,
        matches_this_month: time_based.0,
        matches_this_week: time_based.1,
        new_users_this_month: time_based.2,
        matches_by_status: match_stats.0,
        average_participants_per_match: match_stats.1,
        matches_by_club: club_stats.0,
        top_clubs_by_members: club_stats.1,
        users_by_month: trends.0,
        matches_by_month: trends.1,
    })
}

/// Global counts, via SQL function or concurrent fallback
async fn basic_counts(pool: &PgPool) -> Result<BasicCounts, StatsError> {
    let rpc: Result<BasicCounts, sqlx::Error> =
        sqlx::query_as("SELECT * FROM get_basic_counts()")
            .fetch_one(pool)
            .await;

    match rpc {
        Ok(counts) => Ok(counts),
        Err(err) => {
            warn!(
                error = %err,
                "get_basic_counts function unavailable, falling back to direct counts"
            );

            let (total_users, total_clubs, total_matches, total_members, total_participants) =
                tokio::try_join!(
                    Profile::count(pool),
                    Club::count(pool),
                    Match::count(pool),
                    ClubMembership::count(pool),
                    MatchParticipant::count(pool),
                )?;

            Ok(BasicCounts {
                total_users,
                total_clubs,
                total_matches,
                total_members,
                total_participants,
            })
        }
    }
}

/// (matches this month, matches this week, new users this month)
async fn time_based_counts(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<(i64, i64, i64), StatsError> {
    let start_of_month = month_start(now);
    let start_of_week = week_start(now);

    let (matches_this_month, matches_this_week, new_users_this_month) = tokio::try_join!(
        count_since(pool, "matches", start_of_month),
        count_since(pool, "matches", start_of_week),
        count_since(pool, "profiles", start_of_month),
    )?;

    Ok((matches_this_month, matches_this_week, new_users_this_month))
}

/// Counts rows of `table` created at or after `since`
///
/// `table` is always one of the fixed names above, never user input.
async fn count_since(
    pool: &PgPool,
    table: &str,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table} WHERE created_at >= $1");
    let (count,): (i64,) = sqlx::query_as(&query).bind(since).fetch_one(pool).await?;
    Ok(count)
}

/// (matches by status, average participants per match)
async fn match_breakdown(pool: &PgPool) -> Result<(Vec<StatusCount>, f64), StatsError> {
    let by_status: Vec<StatusCount> = sqlx::query_as(
        "SELECT status, COUNT(*) AS count FROM matches GROUP BY status ORDER BY count DESC, status",
    )
    .fetch_all(pool)
    .await?;

    let (average,): (f64,) = sqlx::query_as(
        "SELECT COALESCE(AVG(current_participants), 0)::FLOAT8 FROM matches",
    )
    .fetch_one(pool)
    .await?;

    Ok((by_status, round_one_decimal(average)))
}

/// (matches by club, top clubs by members)
async fn club_breakdown(pool: &PgPool) -> Result<(Vec<ClubCount>, Vec<TopClub>), StatsError> {
    let by_club: Vec<ClubCount> = sqlx::query_as(
        "SELECT c.name AS club_name, COUNT(*) AS count \
         FROM matches m INNER JOIN clubs c ON c.id = m.club_id \
         GROUP BY c.name ORDER BY count DESC, club_name",
    )
    .fetch_all(pool)
    .await?;

    let top_clubs: Vec<TopClub> = sqlx::query_as(
        "SELECT name AS club_name, member_count FROM clubs \
         ORDER BY member_count DESC, name LIMIT $1",
    )
    .bind(TOP_CLUBS_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok((by_club, top_clubs))
}

/// (users by month, matches by month), both zero-filled over six months
async fn trend_histograms(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<(Vec<MonthCount>, Vec<MonthCount>), StatsError> {
    let window_start = trend_window_start(now);
    debug!(window_start = %window_start, "Gathering trend histograms");

    let (user_rows, match_rows) = tokio::try_join!(
        monthly_rows(pool, "profiles", window_start),
        monthly_rows(pool, "matches", window_start),
    )?;

    Ok((
        monthly_buckets(now, &user_rows),
        monthly_buckets(now, &match_rows),
    ))
}

/// Per-month creation counts for `table` since `since`
async fn monthly_rows(
    pool: &PgPool,
    table: &str,
    since: DateTime<Utc>,
) -> Result<Vec<(DateTime<Utc>, i64)>, sqlx::Error> {
    let query = format!(
        "SELECT date_trunc('month', created_at) AS month, COUNT(*) AS count \
         FROM {table} WHERE created_at >= $1 GROUP BY month"
    );
    sqlx::query_as(&query).bind(since).fetch_all(pool).await
}

/// Start of the month containing `now`
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap_or_else(|| now.date_naive());
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Most recent Sunday at the current time of day
///
/// A Sunday maps to itself, so the weekly window always spans at most
/// seven days.
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = now.weekday().num_days_from_sunday() as i64;
    now - chrono::Duration::days(days_since_sunday)
}

/// Start of the oldest month in the trend window
fn trend_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = shift_month(now.year(), now.month(), TREND_MONTHS - 1);
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| now.date_naive());
    first.and_time(NaiveTime::MIN).and_utc()
}

/// The calendar month `back` months before `(year, month)`
fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// French short label for a month, e.g. "janv. 2026"
fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date
            .format_localized("%b %Y", Locale::fr_FR)
            .to_string(),
        None => format!("{year}-{month:02}"),
    }
}

/// Zero-fills per-month counts into the six-month histogram
///
/// `rows` pairs each month's start timestamp with its count, as returned
/// by `date_trunc('month', ...)`. Months outside the window are dropped,
/// months without a row appear with zero, and the result ends with the
/// month containing `now`.
fn monthly_buckets(now: DateTime<Utc>, rows: &[(DateTime<Utc>, i64)]) -> Vec<MonthCount> {
    let counts: std::collections::HashMap<(i32, u32), i64> = rows
        .iter()
        .map(|(month, count)| ((month.year(), month.month()), *count))
        .collect();

    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now.year(), now.month(), back);
            MonthCount {
                month: month_label(year, month),
                count: counts.get(&(year, month)).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Rounds to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
