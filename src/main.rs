//! fincalc CLI
//!
//! Command-line interface for the loan, mortgage, growth and tax calculators
//!
//! ```bash
//! fincalc loan --principal 250000 --rate 6.5 --years 30
//! fincalc mortgage --price 500000 --down 100000 --rate 6.5 --property-tax 6000 --start 2025-03-01
//! fincalc compound --principal 10000 --rate 7 --years 10 --deposit 200 --timing beginning
//! fincalc --json retire --age 35 --savings 80000
//! fincalc --csv brackets.csv tax --income 95000 --status marriedJointly
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use fincalc::amortization::{calculate_mortgage, LoanCalculation, LoanTerms, MortgageInputs, DEFAULT_PREVIEW_PERIODS};
use fincalc::growth::{
    calculate_compound_interest, project_investment, project_retirement, CompoundInterestInputs, ContributionTiming,
    InvestmentInputs, RetirementInputs, RiskProfile,
};
use fincalc::rates::CompoundingFrequency;
use fincalc::tables::{FilingStatus, TaxTables};
use fincalc::tax::{estimate_tax, Adjustments, ItemizedDeductions, TaxInputs};

/// Personal finance calculators
#[derive(Parser)]
#[command(name = "fincalc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print the full result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write the row schedule to a CSV file
    #[arg(long, global = true, value_name = "PATH")]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fixed-payment loan with an amortization preview
    Loan(LoanArgs),
    /// Mortgage with escrow, PMI and payoff date
    Mortgage(MortgageArgs),
    /// Compound interest with regular deposits
    Compound(CompoundArgs),
    /// Investment growth with escalating contributions
    Invest(InvestArgs),
    /// Retirement readiness
    Retire(RetireArgs),
    /// Federal income tax estimate
    Tax(TaxArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimingArg {
    Beginning,
    End,
}

impl From<TimingArg> for ContributionTiming {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Beginning => ContributionTiming::Beginning,
            TimingArg::End => ContributionTiming::End,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RiskArg {
    Conservative,
    Moderate,
    Aggressive,
    VeryAggressive,
}

impl From<RiskArg> for RiskProfile {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Conservative => RiskProfile::Conservative,
            RiskArg::Moderate => RiskProfile::Moderate,
            RiskArg::Aggressive => RiskProfile::Aggressive,
            RiskArg::VeryAggressive => RiskProfile::VeryAggressive,
        }
    }
}

#[derive(Args)]
struct LoanArgs {
    #[arg(long)]
    principal: f64,
    /// Annual rate in percent
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    years: u32,
    /// Payment frequency
    #[arg(long, default_value = "monthly")]
    frequency: CompoundingFrequency,
    /// Schedule rows to print
    #[arg(long, default_value_t = DEFAULT_PREVIEW_PERIODS)]
    preview: usize,
}

#[derive(Args)]
struct MortgageArgs {
    #[arg(long)]
    price: f64,
    #[arg(long)]
    down: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long, default_value_t = 30)]
    years: u32,
    /// Annual property tax
    #[arg(long, default_value_t = 0.0)]
    property_tax: f64,
    /// Annual homeowner's insurance
    #[arg(long, default_value_t = 0.0)]
    insurance: f64,
    /// Monthly PMI; estimated when omitted and the down payment is under 20%
    #[arg(long)]
    pmi: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,
    /// First payment date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
}

#[derive(Args)]
struct CompoundArgs {
    #[arg(long)]
    principal: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    years: u32,
    #[arg(long, default_value = "monthly")]
    compounding: CompoundingFrequency,
    #[arg(long, default_value_t = 0.0)]
    deposit: f64,
    #[arg(long, default_value = "monthly")]
    deposit_frequency: CompoundingFrequency,
    #[arg(long, value_enum, default_value = "end")]
    timing: TimingArg,
}

#[derive(Args)]
struct InvestArgs {
    #[arg(long)]
    initial: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly: f64,
    /// Expected annual return in percent
    #[arg(long, conflicts_with = "risk")]
    rate: Option<f64>,
    /// Use a preset return instead of --rate
    #[arg(long, value_enum)]
    risk: Option<RiskArg>,
    #[arg(long)]
    years: u32,
    #[arg(long, default_value = "monthly")]
    compounding: CompoundingFrequency,
    #[arg(long, default_value_t = 0.0)]
    inflation: f64,
    /// Tax rate on returns, in percent
    #[arg(long, default_value_t = 0.0)]
    tax_rate: f64,
    /// Yearly raise of the monthly contribution, in percent
    #[arg(long, default_value_t = 0.0)]
    increase: f64,
}

#[derive(Args)]
struct RetireArgs {
    #[arg(long, default_value_t = 30)]
    age: u32,
    #[arg(long, default_value_t = 65)]
    retire_at: u32,
    #[arg(long, default_value_t = 85)]
    life_expectancy: u32,
    #[arg(long, default_value_t = 75_000.0)]
    income: f64,
    #[arg(long, default_value_t = 50_000.0)]
    savings: f64,
    #[arg(long, default_value_t = 1_000.0)]
    monthly: f64,
    /// Employer match, percent of the employee contribution
    #[arg(long, default_value_t = 50.0)]
    employer_match: f64,
    /// Matched contributions cap, percent of income
    #[arg(long, default_value_t = 6.0)]
    match_limit: f64,
    #[arg(long, default_value_t = 7.0)]
    return_before: f64,
    #[arg(long, default_value_t = 4.0)]
    return_during: f64,
    #[arg(long, default_value_t = 2.5)]
    inflation: f64,
    /// Desired monthly income in today's money
    #[arg(long, default_value_t = 5_000.0)]
    desired_income: f64,
    #[arg(long, default_value_t = 1_500.0)]
    social_security: f64,
    #[arg(long, default_value_t = 0.0)]
    pension: f64,
    #[arg(long, default_value_t = 0.0)]
    other_income: f64,
    #[arg(long, default_value_t = 4.0)]
    withdrawal_rate: f64,
    /// Calendar year of the current age
    #[arg(long)]
    start_year: Option<i32>,
}

#[derive(Args)]
struct TaxArgs {
    #[arg(long)]
    income: f64,
    #[arg(long, default_value = "single")]
    status: FilingStatus,
    /// Tax year; defaults to the latest configured year
    #[arg(long)]
    year: Option<i32>,
    /// Directory of tax table CSV files; built-in tables when omitted
    #[arg(long, value_name = "DIR")]
    tables: Option<PathBuf>,
    #[arg(long, default_value_t = 0.0)]
    k401: f64,
    #[arg(long, default_value_t = 0.0)]
    ira: f64,
    #[arg(long, default_value_t = 0.0)]
    health_insurance: f64,
    #[arg(long, default_value_t = 0.0)]
    hsa: f64,
    #[arg(long, default_value_t = 0.0)]
    student_loan_interest: f64,
    /// Itemize when it beats the standard deduction
    #[arg(long)]
    itemize: bool,
    #[arg(long, default_value_t = 0.0)]
    mortgage_interest: f64,
    #[arg(long, default_value_t = 0.0)]
    property_tax: f64,
    #[arg(long, default_value_t = 0.0)]
    salt: f64,
    #[arg(long, default_value_t = 0.0)]
    charity: f64,
    #[arg(long, default_value_t = 0.0)]
    other_deductions: f64,
    #[arg(long, default_value_t = 0.0)]
    withheld: f64,
    #[arg(long, default_value_t = 0.0)]
    estimated: f64,
}

/// Output options shared by every subcommand
struct Output {
    json: bool,
    csv: Option<PathBuf>,
}

impl Output {
    fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn rows<T, I>(&self, rows: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        if let Some(path) = &self.csv {
            let count = write_csv(path, rows)?;
            if !self.json {
                println!("\n{} rows written to: {}", count, path.display());
            }
        }
        Ok(())
    }
}

fn write_csv<T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let out = Output {
        json: cli.json,
        csv: cli.csv,
    };

    match cli.command {
        Command::Loan(args) => run_loan(args, &out),
        Command::Mortgage(args) => run_mortgage(args, &out),
        Command::Compound(args) => run_compound(args, &out),
        Command::Invest(args) => run_invest(args, &out),
        Command::Retire(args) => run_retire(args, &out),
        Command::Tax(args) => run_tax(args, &out),
    }
}

fn run_loan(args: LoanArgs, out: &Output) -> Result<()> {
    let ppy = args.frequency.periods_per_year();
    let terms = LoanTerms::new(args.principal, args.rate, args.years.saturating_mul(ppy), ppy);
    let calc = LoanCalculation::calculate(terms, args.preview);

    if out.json {
        out.json(&calc)?;
    } else {
        let summary = &calc.summary;
        println!(
            "Loan: ${:.2} at {}% over {} {} payments",
            args.principal,
            args.rate,
            summary.number_of_payments,
            args.frequency.label().to_lowercase()
        );
        println!("  Payment: ${:.2}", summary.payment);
        println!("  Total Paid: ${:.2}", summary.total_payment);
        println!("  Total Interest: ${:.2}", summary.total_interest);

        if !calc.preview.is_empty() {
            println!();
            println!("{:>6} {:>12} {:>12} {:>12} {:>14}", "Period", "Payment", "Principal", "Interest", "Balance");
            println!("{}", "-".repeat(60));
            for row in &calc.preview {
                println!(
                    "{:>6} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                    row.period_index, row.payment_amount, row.principal_portion, row.interest_portion, row.ending_balance
                );
            }
            let remaining = (summary.number_of_payments as usize).saturating_sub(calc.preview.len());
            if remaining > 0 {
                println!("... ({} more periods)", remaining);
            }
        }
    }

    out.rows(calc.terms.schedule())
}

fn run_mortgage(args: MortgageArgs, out: &Output) -> Result<()> {
    let inputs = MortgageInputs {
        home_price: args.price,
        down_payment: args.down,
        term_years: args.years,
        annual_rate_percent: args.rate,
        annual_property_tax: args.property_tax,
        annual_home_insurance: args.insurance,
        monthly_pmi: args.pmi,
        monthly_hoa: args.hoa,
        start_date: args.start,
    };
    let result = calculate_mortgage(&inputs);

    if out.json {
        out.json(&result)?;
    } else {
        println!("Mortgage: ${:.2} loan ({:.1}% down)", result.loan_amount, inputs.down_payment_fraction() * 100.0);
        println!("  Principal & Interest: ${:.2}", result.monthly_principal_interest);
        println!("  Property Tax: ${:.2}", result.monthly_property_tax);
        println!("  Insurance: ${:.2}", result.monthly_insurance);
        println!("  PMI: ${:.2}", result.monthly_pmi);
        println!("  HOA: ${:.2}", result.monthly_hoa);
        println!("  Total Monthly: ${:.2}", result.total_monthly_payment);
        println!("  Total Interest: ${:.2}", result.total_interest);
        println!("  Total Paid: ${:.2}", result.total_paid);
        if let Some(payoff) = result.payoff_date {
            println!("  Payoff Date: {}", payoff);
        }

        println!();
        println!("{:>4} {:>14} {:>14} {:>14}", "Year", "Principal", "Interest", "Balance");
        println!("{}", "-".repeat(50));
        for year in &result.yearly {
            println!("{:>4} {:>14.2} {:>14.2} {:>14.2}", year.year, year.principal, year.interest, year.balance);
        }
    }

    out.rows(&result.schedule)
}

fn run_compound(args: CompoundArgs, out: &Output) -> Result<()> {
    let inputs = CompoundInterestInputs {
        principal: args.principal,
        annual_rate_percent: args.rate,
        years: args.years,
        compounding: args.compounding,
        deposit: args.deposit,
        deposit_frequency: args.deposit_frequency,
        deposit_timing: args.timing.into(),
    };
    let result = calculate_compound_interest(&inputs);

    if out.json {
        out.json(&result)?;
    } else {
        println!("Compound Interest ({} compounding):", args.compounding.label());
        println!("  Future Value: ${:.2}", result.future_value);
        println!("  Total Deposits: ${:.2}", result.total_deposits);
        println!("  Total Interest: ${:.2}", result.total_interest);
        println!("  Effective Annual Rate: {:.4}%", result.effective_rate * 100.0);

        println!();
        println!("{:<14} {:>16} {:>16}", "Compounding", "Future Value", "Interest");
        println!("{}", "-".repeat(48));
        for row in &result.comparison {
            println!("{:<14} {:>16.2} {:>16.2}", row.label, row.future_value, row.total_interest);
        }
    }

    out.rows(&result.detailed_schedule)
}

fn run_invest(args: InvestArgs, out: &Output) -> Result<()> {
    let mut inputs = InvestmentInputs {
        initial_investment: args.initial,
        monthly_contribution: args.monthly,
        annual_return_percent: args.rate.unwrap_or_default(),
        years: args.years,
        compounding: args.compounding,
        inflation_rate_percent: args.inflation,
        tax_rate_percent: args.tax_rate,
        contribution_increase_percent: args.increase,
    };
    match (args.rate, args.risk) {
        (_, Some(risk)) => inputs = inputs.with_risk_profile(risk.into()),
        (Some(_), None) => {}
        (None, None) => return Err(anyhow!("either --rate or --risk is required")),
    }
    let result = project_investment(&inputs);

    if out.json {
        out.json(&result)?;
    } else {
        println!("Investment ({}% expected return):", inputs.annual_return_percent);
        if let Some(risk) = args.risk {
            let profile: RiskProfile = risk.into();
            println!("  Risk Profile: {:?} ({}% annual volatility)", profile, profile.volatility_percent());
        }
        println!("  Future Value: ${:.2}", result.future_value);
        println!("  Total Contributions: ${:.2}", result.total_contributions);
        println!("  Total Returns: ${:.2}", result.total_returns);
        println!("  Inflation-Adjusted: ${:.2}", result.inflation_adjusted_value);
        println!("  After Tax: ${:.2}", result.after_tax_value);
        println!("  Annualized Return: {:.2}%", result.effective_annual_return * 100.0);

        println!();
        println!("{:>4} {:>16} {:>16} {:>14} {:>16}", "Year", "Balance", "Contributions", "Returns", "Real Value");
        println!("{}", "-".repeat(70));
        for year in &result.yearly {
            println!(
                "{:>4} {:>16.2} {:>16.2} {:>14.2} {:>16.2}",
                year.year, year.balance, year.contributions, year.returns, year.inflation_adjusted
            );
        }
    }

    out.rows(&result.yearly)
}

fn run_retire(args: RetireArgs, out: &Output) -> Result<()> {
    let inputs = RetirementInputs {
        current_age: args.age,
        retirement_age: args.retire_at,
        life_expectancy: args.life_expectancy,
        current_income: args.income,
        current_savings: args.savings,
        monthly_contribution: args.monthly,
        employer_match_percent: args.employer_match,
        employer_match_limit_percent: args.match_limit,
        return_before_retirement_percent: args.return_before,
        return_during_retirement_percent: args.return_during,
        inflation_rate_percent: args.inflation,
        desired_monthly_income: args.desired_income,
        social_security_monthly: args.social_security,
        pension_monthly: args.pension,
        other_income_monthly: args.other_income,
        safe_withdrawal_rate_percent: args.withdrawal_rate,
        start_year: args.start_year,
    };
    let result = project_retirement(&inputs);

    if out.json {
        out.json(&result)?;
    } else {
        println!("Retirement at {} ({} years away):", inputs.retirement_age, inputs.years_to_retirement());
        println!("  Projected Balance: ${:.2}", result.retirement_balance);
        println!("  Employer Match: ${:.2}/month", result.monthly_employer_match);
        println!("  Income Needed: ${:.2}/month", result.monthly_income_needed);
        println!("  Income From Savings: ${:.2}/month", result.monthly_income_from_savings);
        println!("  Total Income: ${:.2}/month", result.total_monthly_income);
        if result.on_track {
            println!("  On track: surplus of ${:.2}/month", -result.shortfall);
        } else {
            println!("  Shortfall: ${:.2}/month", result.shortfall);
            println!("  Required Contribution: ${:.2}/month", result.required_monthly_contribution);
        }
        match result.depletion_age {
            Some(age) => println!("  Savings run out at age {}", age),
            None => println!("  Savings last past age {}", inputs.life_expectancy),
        }
    }

    // The first drawdown row repeats the retirement-age balance
    out.rows(result.accumulation.iter().chain(result.drawdown.iter().skip(1)))
}

/// Bracket breakdown row for CSV output
#[derive(Serialize)]
struct BracketRow {
    bracket: String,
    income: f64,
    tax: f64,
    rate: f64,
}

fn run_tax(args: TaxArgs, out: &Output) -> Result<()> {
    let tables = match &args.tables {
        Some(dir) => TaxTables::load_from(dir).with_context(|| format!("Loading tax tables from {}", dir.display()))?,
        None => TaxTables::builtin(),
    };
    let table = match args.year {
        Some(year) => tables.year(year)?,
        None => tables.latest().context("No tax tables configured")?,
    };

    let inputs = TaxInputs {
        gross_income: args.income,
        filing_status: args.status,
        adjustments: Adjustments {
            retirement_401k: args.k401,
            traditional_ira: args.ira,
            self_employed_health_insurance: args.health_insurance,
            hsa: args.hsa,
            student_loan_interest: args.student_loan_interest,
        },
        itemized: ItemizedDeductions {
            mortgage_interest: args.mortgage_interest,
            property_tax: args.property_tax,
            state_local_taxes: args.salt,
            charitable_donations: args.charity,
            other: args.other_deductions,
        },
        use_itemized: args.itemize,
        withholding: args.withheld,
        estimated_payments: args.estimated,
    };
    let result = estimate_tax(&inputs, table)?;

    if out.json {
        out.json(&result)?;
    } else {
        println!("{} Federal Tax ({}):", result.tax_year, result.filing_status);
        println!("  Gross Income: ${:.2}", result.gross_income);
        println!("  Adjusted Gross Income: ${:.2}", result.adjusted_gross_income);
        println!("  Deductions ({:?}): ${:.2}", result.deduction_kind, result.deductions);
        println!("  Taxable Income: ${:.2}", result.taxable_income);
        println!("  Federal Tax: ${:.2}", result.total_tax);
        println!("  Effective Rate: {:.2}%", result.effective_rate * 100.0);
        println!("  Marginal Rate: {:.0}%", result.marginal_rate * 100.0);
        println!("  After-Tax Income: ${:.2}", result.after_tax_income);
        if result.refund_or_owed >= 0.0 {
            println!("  Refund: ${:.2}", result.refund_or_owed);
        } else {
            println!("  Owed: ${:.2}", -result.refund_or_owed);
        }

        println!();
        println!("{:<26} {:>6} {:>14} {:>12}", "Bracket", "Rate", "Income", "Tax");
        println!("{}", "-".repeat(61));
        for line in &result.breakdown {
            println!(
                "{:<26} {:>5.0}% {:>14.2} {:>12.2}",
                line.range.to_string(),
                line.rate * 100.0,
                line.income,
                line.tax
            );
        }
    }

    out.rows(result.breakdown.iter().map(|line| BracketRow {
        bracket: line.range.to_string(),
        income: line.income,
        tax: line.tax,
        rate: line.rate,
    }))
}
