//! Daily trigger and ordered step execution for the scrape job.

use crate::collector::Collector;
use crate::config::{ScheduleConfig, ScrapeConfig};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::notify::{Notifier, notify_completion};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A named unit of work in the job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Scrape,
    Notify,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Scrape => "scrape",
            Step::Notify => "notify",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scrape" => Ok(Step::Scrape),
            "notify" => Ok(Step::Notify),
            other => Err(Error::InvalidSchedule(format!("unknown step '{}'", other))),
        }
    }
}

/// Executes a single step
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run_step(&self, step: Step) -> Result<()>;
}

/// Steps in declared order, each retried on failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
    retries: usize,
    retry_delay: Duration,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>, retries: usize, retry_delay: Duration) -> Self {
        Self {
            steps,
            retries,
            retry_delay,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        let steps = config
            .steps
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<Step>>>()?;
        if steps.is_empty() {
            return Err(Error::InvalidSchedule("no steps configured".to_string()));
        }
        if steps.first() == Some(&Step::Notify) && steps.contains(&Step::Scrape) {
            ::log::warn!("Completion notification is ordered before the scrape step");
        }
        Ok(Self::new(
            steps,
            config.retries,
            Duration::from_secs(config.retry_delay_secs),
        ))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs every step in order. A step that fails all of its attempts stops
    /// the steps after it.
    pub async fn run<R: StepRunner + ?Sized>(&self, runner: &R) -> Result<()> {
        let attempts = self.retries + 1;
        for &step in &self.steps {
            let mut attempt = 1;
            loop {
                ::log::info!("Running step {} (attempt {}/{})", step, attempt, attempts);
                match runner.run_step(step).await {
                    Ok(()) => break,
                    Err(e) if attempt < attempts => {
                        ::log::warn!("Step {} failed: {}; retrying", step, e);
                        tokio::time::sleep(self.retry_delay).await;
                        attempt += 1;
                    }
                    Err(e) => {
                        ::log::error!("Step {} failed: {}", step, e);
                        return Err(Error::StepFailed {
                            step: step.name().to_string(),
                            attempts,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fires once a day at a fixed wall-clock time in a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    time: NaiveTime,
    offset: FixedOffset,
}

impl DailySchedule {
    pub fn new(hour: u32, minute: u32, utc_offset_minutes: i32) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            Error::InvalidSchedule(format!("invalid time of day {:02}:{:02}", hour, minute))
        })?;
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60).ok_or_else(|| {
            Error::InvalidSchedule(format!("invalid UTC offset {} minutes", utc_offset_minutes))
        })?;
        Ok(Self { time, offset })
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        Self::new(config.hour, config.minute, config.utc_offset_minutes)
    }

    /// The first trigger strictly after `now`. Missed days are not caught up.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let local_trigger = local_date.and_time(self.time);
        let utc_trigger =
            local_trigger - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        let candidate = utc_trigger.and_utc();
        if candidate > now {
            candidate
        } else {
            candidate + TimeDelta::days(1)
        }
    }
}

/// Runs the scrape and notify steps against live collaborators
pub struct ScrapeJob<'a> {
    config: &'a ScrapeConfig,
    fetcher: &'a dyn Fetcher,
    notifier: &'a dyn Notifier,
}

impl<'a> ScrapeJob<'a> {
    pub fn new(
        config: &'a ScrapeConfig,
        fetcher: &'a dyn Fetcher,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            fetcher,
            notifier,
        }
    }
}

#[async_trait]
impl StepRunner for ScrapeJob<'_> {
    async fn run_step(&self, step: Step) -> Result<()> {
        match step {
            Step::Scrape => Collector::new(self.config, self.fetcher)?.run_scrape().await,
            Step::Notify => notify_completion(self.notifier, &self.config.notification).await,
        }
    }
}

/// Sleeps until each daily trigger and runs the pipeline. Never returns.
pub async fn run_daily<R: StepRunner + ?Sized>(
    schedule: &DailySchedule,
    pipeline: &Pipeline,
    runner: &R,
) {
    loop {
        let now = Utc::now();
        let next = schedule.next_after(now);
        ::log::info!("Next run scheduled for {}", next.with_timezone(&schedule.offset));
        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if let Err(e) = pipeline.run(runner).await {
            ::log::error!("Scheduled run failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    /// Records each step; fails a step while its budget of failures lasts.
    #[derive(Default)]
    struct Scripted {
        ran: Mutex<Vec<Step>>,
        scrape_failures: Mutex<usize>,
    }

    impl Scripted {
        fn failing_scrape(times: usize) -> Self {
            Self {
                scrape_failures: Mutex::new(times),
                ..Self::default()
            }
        }

        fn ran(&self) -> Vec<Step> {
            self.ran.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StepRunner for Scripted {
        async fn run_step(&self, step: Step) -> Result<()> {
            self.ran.lock().unwrap().push(step);
            let mut left = self.scrape_failures.lock().unwrap();
            if step == Step::Scrape && *left > 0 {
                *left -= 1;
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }
    }

    #[test]
    fn test_step_names() {
        assert_eq!("scrape".parse::<Step>().unwrap(), Step::Scrape);
        assert_eq!(" Notify ".parse::<Step>().unwrap(), Step::Notify);
        assert!("email".parse::<Step>().is_err());
        assert_eq!(Step::Scrape.to_string(), "scrape");
    }

    #[test]
    fn test_default_pipeline_keeps_declared_order() {
        let pipeline = Pipeline::from_config(&ScheduleConfig::default()).unwrap();
        assert_eq!(pipeline.steps(), &[Step::Notify, Step::Scrape]);
    }

    #[test]
    fn test_empty_pipeline_rejected() {
        let config = ScheduleConfig {
            steps: Vec::new(),
            ..ScheduleConfig::default()
        };
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(Error::InvalidSchedule(_))
        ));
    }

    #[tokio::test]
    async fn test_runs_steps_in_order() {
        let pipeline = Pipeline::new(vec![Step::Scrape, Step::Notify], 1, Duration::ZERO);
        let runner = Scripted::default();
        pipeline.run(&runner).await.unwrap();
        assert_eq!(runner.ran(), vec![Step::Scrape, Step::Notify]);
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let pipeline = Pipeline::new(vec![Step::Scrape, Step::Notify], 1, Duration::ZERO);
        let runner = Scripted::failing_scrape(1);
        pipeline.run(&runner).await.unwrap();
        assert_eq!(runner.ran(), vec![Step::Scrape, Step::Scrape, Step::Notify]);
    }

    #[tokio::test]
    async fn test_exhausted_retries_stop_later_steps() {
        let pipeline = Pipeline::new(vec![Step::Scrape, Step::Notify], 1, Duration::ZERO);
        let runner = Scripted::failing_scrape(5);
        let err = pipeline.run(&runner).await.unwrap_err();
        assert!(matches!(
            err,
            Error::StepFailed { ref step, attempts: 2 } if step == "scrape"
        ));
        assert_eq!(runner.ran(), vec![Step::Scrape, Step::Scrape]);
    }

    #[test]
    fn test_next_after_same_day() {
        let schedule = DailySchedule::new(11, 0, 330).unwrap();
        // 04:00 UTC is 09:30 IST, so 11:00 IST (05:30 UTC) is still ahead
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 4, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2024, 4, 1, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_after_rolls_to_tomorrow() {
        let schedule = DailySchedule::new(11, 0, 330).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 5, 30, 0).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2024, 4, 2, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_after_across_utc_midnight() {
        let schedule = DailySchedule::new(1, 0, 330).unwrap();
        // 20:00 UTC on the 1st is 01:30 IST on the 2nd; next 01:00 IST is the 3rd
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2024, 4, 2, 19, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid_schedule() {
        assert!(DailySchedule::new(24, 0, 0).is_err());
        assert!(DailySchedule::new(11, 0, 24 * 60).is_err());
    }

    #[tokio::test]
    async fn test_scrape_job_runs_both_steps() {
        use crate::fetch::FetchResponse;

        struct Down;

        #[async_trait]
        impl Fetcher for Down {
            async fn fetch(&self, url: &str) -> Result<FetchResponse> {
                Err(Error::Transport {
                    url: url.to_string(),
                    message: "offline".to_string(),
                })
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            page_count: 2,
            output_path: dir.path().join("out.csv"),
            ..ScrapeConfig::default()
        };
        let notifier = crate::notify::LogNotifier::new("ops@example.com");
        let job = ScrapeJob::new(&config, &Down, &notifier);

        let pipeline = Pipeline::from_config(&config.schedule).unwrap();
        pipeline.run(&job).await.unwrap();

        assert!(config.output_path.exists());
    }
}
