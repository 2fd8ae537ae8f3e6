use serde_json::Value;
use wbseller_core::{HttpMethod, RequestOptions, SellerApi};

use crate::cli::{GetArgs, PostArgs};
use crate::error::CliError;

use super::parse_json_arg;

pub fn run_get(args: &GetArgs, api: &SellerApi) -> Result<Value, CliError> {
    let options = RequestOptions::with_query(
        args.query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    Ok(api.request_to_service(args.service, HttpMethod::Get, &args.endpoint, &options)?)
}

pub fn run_post(args: &PostArgs, api: &SellerApi) -> Result<Value, CliError> {
    let body = parse_json_arg("body", &args.body)?;
    let options = RequestOptions::with_body(body);

    Ok(api.request_to_service(args.service, HttpMethod::Post, &args.endpoint, &options)?)
}
