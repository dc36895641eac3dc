use std::future::Future;

use anyhow::{anyhow, bail, Context};
use tokio::sync::mpsc;
use tracing::debug;
use trip_core::{cities, dispatch_to, CallScope, Trip, TripError, TripForm, TripService, TripStatus};

use crate::cli::TripFields;

/// One CLI invocation: a service plus the scope its calls run in. Ctrl-C
/// releases the scope, so a reply that arrives afterwards is dropped.
pub struct Session {
    service: TripService,
    scope: CallScope,
}

impl Session {
    pub fn new(base_url: &str) -> Self {
        Self {
            service: TripService::new(base_url),
            scope: CallScope::new(),
        }
    }

    async fn call<T, F, Fut>(&self, op: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(TripService) -> Fut,
        Fut: Future<Output = Result<T, TripError>> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch_to(&self.scope, op(self.service.clone()), tx);

        tokio::select! {
            result = rx.recv() => match result {
                Some(result) => Ok(result?),
                None => bail!("request was abandoned"),
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted; releasing call scope");
                self.scope.release();
                bail!("interrupted")
            }
        }
    }
}

pub async fn cmd_list(session: &Session) -> anyhow::Result<()> {
    let trips = session.call(|s| async move { s.list_trips().await }).await?;

    if trips.is_empty() {
        println!("No trips planned yet.");
    } else {
        for trip in &trips {
            println!("{}", summary_line(trip));
        }
    }
    Ok(())
}

pub async fn cmd_get(session: &Session, id: &str) -> anyhow::Result<()> {
    let trip = fetch(session, id).await?;
    print!("{}", details(&trip));
    Ok(())
}

pub async fn cmd_create(session: &Session, fields: TripFields) -> anyhow::Result<()> {
    let request = validated(fill(TripForm::default(), fields))?;
    let trip = session
        .call(|s| async move { s.create_trip(&request).await })
        .await
        .context("could not create trip")?;

    println!("Created trip {}", trip.id.as_deref().unwrap_or("(no id)"));
    print!("{}", details(&trip));
    Ok(())
}

pub async fn cmd_update(
    session: &Session,
    id: &str,
    fields: TripFields,
    status: Option<TripStatus>,
) -> anyhow::Result<()> {
    let current = fetch(session, id).await?;

    let mut request = validated(fill(TripForm::from_trip(&current), fields))?;
    request.status = match status {
        Some(status) => status.to_string(),
        None => current.to_request().status,
    };

    let id = id.to_string();
    let trip = session
        .call(|s| async move { s.update_trip(&id, &request).await })
        .await
        .context("could not update trip")?;

    println!("Updated trip {}", trip.id.as_deref().unwrap_or("(no id)"));
    print!("{}", details(&trip));
    Ok(())
}

pub async fn cmd_delete(session: &Session, id: &str) -> anyhow::Result<()> {
    let owned = id.to_string();
    session
        .call(|s| async move { s.delete_trip(&owned).await })
        .await
        .with_context(|| format!("could not delete trip {id}"))?;

    println!("Deleted trip {id}");
    Ok(())
}

pub fn cmd_cities(query: Option<&str>) {
    let matches = cities::search(query.unwrap_or_default());
    if matches.is_empty() {
        println!("No matching cities.");
    }
    for city in matches {
        println!("{} {}", city.flag, city.label());
    }
}

async fn fetch(session: &Session, id: &str) -> anyhow::Result<Trip> {
    let owned = id.to_string();
    session
        .call(|s| async move { s.get_trip(&owned).await })
        .await
        .with_context(|| format!("could not load trip {id}"))
}

/// Overlay whatever the user passed on top of `form`.
fn fill(mut form: TripForm, fields: TripFields) -> TripForm {
    let TripFields {
        destination,
        start_date,
        end_date,
        budget,
        travelers,
        description,
    } = fields;
    if let Some(v) = destination {
        form.destination = v;
    }
    if let Some(v) = start_date {
        form.start_date = v;
    }
    if let Some(v) = end_date {
        form.end_date = v;
    }
    if let Some(v) = budget {
        form.budget = v;
    }
    if let Some(v) = travelers {
        form.travelers = v;
    }
    if let Some(v) = description {
        form.description = v;
    }
    form
}

fn validated(form: TripForm) -> anyhow::Result<trip_core::CreateTripRequest> {
    form.validate().map_err(|errors| {
        let problems: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
        anyhow!("{errors}: {}", problems.join("; "))
    })
}

fn summary_line(trip: &Trip) -> String {
    format!(
        "{:<12} {:<24} {:<22} {:>12}  {}",
        trip.id.as_deref().unwrap_or("-"),
        trip.destination,
        trip.date_range(),
        trip.formatted_budget(),
        trip.status_label(),
    )
}

fn details(trip: &Trip) -> String {
    let mut out = format!(
        "{}\n  {}\n  {} | {} | {}\n",
        trip.destination,
        trip.date_range(),
        trip.formatted_budget(),
        trip.travelers_text(),
        trip.status_label(),
    );
    if let Some(description) = trip.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("  {description}\n"));
    }
    out
}
