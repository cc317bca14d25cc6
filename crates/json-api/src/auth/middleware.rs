//! Auth middleware.
//!
//! Resolves the bearer token to a [`Principal`] and stores it in the depot
//! for the handlers behind it.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use venda::principal::Principal;
use venda_app::auth::AuthServiceError;

use crate::{errors, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(
            StatusError::unauthorized()
                .brief("unauthorized")
                .detail("missing or invalid Authorization header"),
        );

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let principal: Principal = match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::NotFound | AuthServiceError::InvalidReference) => {
            res.render(
                StatusError::unauthorized()
                    .brief("unauthorized")
                    .detail("invalid API token"),
            );

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            res.render(errors::internal("failed to validate api token", &source));

            return;
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
