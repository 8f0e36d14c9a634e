use texting_robots::Robot;

/// Parsed robots.txt rules for one crawl session.
///
/// The policy is fail-open: when robots.txt is missing, unreachable or
/// unparseable the crawl proceeds as if no restrictions exist.
pub struct RobotsPolicy {
    robot: Option<Robot>,
}

impl RobotsPolicy {
    /// A policy with no restrictions
    pub fn allow_all() -> Self {
        Self { robot: None }
    }

    /// Parse a robots.txt body for the given user-agent.
    ///
    /// An unparseable body yields the unrestricted policy.
    pub fn parse(user_agent: &str, body: &str) -> Self {
        match Robot::new(user_agent, body.as_bytes()) {
            Ok(robot) => Self { robot: Some(robot) },
            Err(e) => {
                ::log::warn!("Unparseable robots.txt, proceeding unrestricted: {}", e);
                Self { robot: None }
            }
        }
    }

    /// Whether the policy permits fetching the given URL
    pub fn is_allowed(&self, url: &str) -> bool {
        match &self.robot {
            Some(robot) => robot.allowed(url),
            None => true,
        }
    }

    /// Whether any restrictions were actually loaded
    pub fn is_restricted(&self) -> bool {
        self.robot.is_some()
    }
}
