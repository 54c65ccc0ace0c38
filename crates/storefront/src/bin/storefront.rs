#![allow(clippy::print_stdout)]

use common_utils::types::{MajorUnit, ResourceId};
use error_stack::ResultExt;
use masking::Secret;
use storefront::{
    configs::settings::{CmdLineConf, Settings, Subcommand},
    core::{
        errors::{ApplicationError, ApplicationResult, StorefrontError, StorefrontResult, ValidationErrorExt},
        payments::{self, CheckoutCompletion, HostedPageLauncher, VerificationResult},
        schemes, user,
    },
    logger, AppState,
};

#[tokio::main]
async fn main() -> ApplicationResult<()> {
    // get commandline config before initializing config
    let cmd_line = <CmdLineConf as clap::Parser>::parse();

    let conf = Settings::with_config_path(cmd_line.config_path)?;
    conf.validate()?;

    let _guard = router_env::setup(
        &conf.log,
        router_env::service_name!(),
        [router_env::service_name!(), "storefront"],
    )
    .map_err(|error| ApplicationError::LoggerInitializationError(error.to_string()))?;

    let Some(subcommand) = cmd_line.subcommand else {
        println!("Nothing to do. Run with --help to list the commands.");
        return Ok(());
    };

    let state = AppState::new(conf).map_err(|error| {
        ApplicationError::InvalidConfigurationValueError(format!("{error:?}"))
    })?;

    if let Err(error) = run(&state, subcommand).await {
        logger::error!(?error, "Command failed");
        let context = error.current_context();
        println!("{}", context.user_message());
        if let Some(redirect_to) = context.redirect_to() {
            println!("Sign in first: storefront signin (the web client would open {redirect_to})");
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: &AppState, subcommand: Subcommand) -> StorefrontResult<()> {
    let launcher = HostedPageLauncher::new(&state.conf.checkout);

    match subcommand {
        Subcommand::Signin {
            identifier,
            password,
        } => {
            let response =
                user::signin(state, Some(&identifier), Some(&Secret::new(password))).await?;
            let name = response
                .user
                .and_then(|user| user.name)
                .unwrap_or_else(|| identifier.clone());
            println!("Signed in as {name}");
        }
        Subcommand::Logout => {
            user::logout(state)?;
            println!("Signed out");
        }
        Subcommand::Schemes => {
            for scheme in schemes::list_schemes(state).await? {
                println!(
                    "{:>6}  {}{}  {} months  min {}",
                    scheme.id,
                    scheme.name,
                    if scheme.popular { " (popular)" } else { "" },
                    scheme
                        .timeline_months
                        .map_or_else(|| "-".to_string(), |months| months.to_string()),
                    scheme
                        .min_amount
                        .map_or_else(|| "-".to_string(), |amount| amount.to_string()),
                );
            }
        }
        Subcommand::MySchemes => {
            for user_scheme in schemes::my_schemes(state).await? {
                println!(
                    "{:>6}  {}  monthly {}  paid {}",
                    user_scheme.id,
                    user_scheme.status,
                    user_scheme.monthly_amount,
                    user_scheme.total_paid,
                );
                for installment in user_scheme.installments() {
                    println!(
                        "        #{} {}  {}  {}",
                        installment
                            .installment_number
                            .map_or_else(|| "-".to_string(), |number| number.to_string()),
                        installment.id,
                        installment.amount,
                        installment.status,
                    );
                }
            }
        }
        Subcommand::Enroll { scheme_id, amount } => {
            let scheme_id = parse_id(&scheme_id)?;
            let monthly_amount = MajorUnit::from_user_input(&amount).to_validation_failed()?;
            let payment =
                payments::enroll_in_scheme(state, &launcher, scheme_id, monthly_amount).await?;
            println!("{}", payment.enrollment.message);
            print_completion(payment.completion);
        }
        Subcommand::Pay { installment_id } => {
            let installment_id = parse_id(&installment_id)?;
            let completion = payments::pay_installment(state, &launcher, &installment_id).await?;
            print_completion(completion);
        }
        Subcommand::Verify {
            installment_id,
            order_id,
            transaction_id,
        } => {
            let installment_id = parse_id(&installment_id)?;
            let gateway_payment_id = transaction_id.unwrap_or_else(|| order_id.clone());
            let result = payments::verify_installment(
                state,
                api_models::scheme_payments::VerifySchemePaymentRequest {
                    scheme_payment_id: installment_id,
                    order_id,
                    gateway_payment_id,
                },
            )
            .await?;
            print_verification(&result);
        }
        Subcommand::Resume {
            return_url,
            transaction_id,
        } => {
            let result =
                payments::resume_from_return_url(state, &return_url, transaction_id).await?;
            print_verification(&result);
        }
    }
    Ok(())
}

fn parse_id(id: &str) -> StorefrontResult<ResourceId> {
    id.parse::<ResourceId>()
        .change_context(StorefrontError::Validation {
            message: "Please enter a valid id".to_string(),
        })
}

fn print_completion(completion: CheckoutCompletion) {
    match completion {
        CheckoutCompletion::Verified(result) => print_verification(&result),
        CheckoutCompletion::Redirected { checkout_url } => {
            println!("Complete the payment at: {checkout_url}");
            println!("Then run: storefront resume --return-url '<the page you are sent back to>'");
        }
    }
}

fn print_verification(result: &VerificationResult) {
    println!("{}", result.message);
    if let Some(navigate_to) = &result.navigate_to {
        println!("Continue at {navigate_to}");
    }
}
