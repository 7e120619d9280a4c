use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use web_sys::Storage;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;

use resgate_core::carousel::{self, Carousel, StepState, AUTO_ADVANCE_MS};
use resgate_core::cpf;
use resgate_core::record::ApiResponse;
use resgate_core::storage::{
    decode_record, encode_record, RAW_CPF_KEY, USER_CPF_KEY, USER_NAME_KEY, USER_RECORD_KEY,
};
use resgate_core::tracking;
use resgate_core::view::{Panel, Shell, ShellView, SHELL_SETTLE_MS, SUCCESS_SCROLL_DELAY_MS};
use resgate_core::{LookupError, UserRecord};

// The upstream API authenticates with a static token in the query string;
// anything shipped to the browser can read it.
const LOOKUP_ENDPOINT: &str = "https://magmadatahub.com/api.php";
const LOOKUP_TOKEN: &str = "98f4c3156730c11c3361837d4193da99a00174ee8f8cc4e19e1363ef17e73efd";

// Next pages in the funnel
const ACTIVATE_URL: &str = "/2";
const SIMULATE_URL: &str = "/2";
const CHAT_URL: &str = "chat.html";

const SLIDES: [(&str, &str); 4] = [
    (
        "Informe seu CPF",
        "Digite seu CPF para localizarmos o saldo disponível em seu nome.",
    ),
    (
        "Confirme seus dados",
        "Verificamos automaticamente seus dados cadastrais, sem burocracia.",
    ),
    (
        "Simule o valor",
        "Veja em segundos quanto você pode resgatar ainda hoje.",
    ),
    (
        "Receba o resgate",
        "O valor liberado cai direto na sua conta, sem filas e sem papelada.",
    ),
];

fn local_storage() -> Option<Storage> {
    window().local_storage().ok().flatten()
}

fn storage_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

fn storage_set(key: &str, value: &str) {
    let _ = local_storage().and_then(|s| s.set_item(key, value).ok());
}

fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

fn navigate(url: &str) {
    let _ = window().location().set_href(url);
}

fn current_query() -> String {
    window().location().search().unwrap_or_default()
}

fn scroll_to(target: NodeRef<html::Div>) {
    if let Some(el) = target.get_untracked() {
        let opts = web_sys::ScrollIntoViewOptions::new();
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        opts.set_block(web_sys::ScrollLogicalPosition::Center);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Writes the resolved record plus the flat name/CPF convenience keys, the
/// shape the chat funnel page reads back.
fn persist_record(record: &UserRecord) {
    match encode_record(record) {
        Ok(json) => storage_set(USER_RECORD_KEY, &json),
        Err(e) => logging::error!("failed to serialize user record: {e}"),
    }
    if let Some(name) = record.name.as_deref() {
        storage_set(USER_NAME_KEY, name);
    }
    if let Some(cpf_digits) = record.cpf.as_deref() {
        storage_set(USER_CPF_KEY, cpf_digits);
    }
}

/// One GET per submission, no retry, no timeout. Non-2xx and network
/// failures are transport errors; an empty body is the domain "no data"
/// outcome.
async fn lookup_cpf(digits: &str) -> Result<UserRecord, LookupError> {
    let url = format!("{LOOKUP_ENDPOINT}?token={LOOKUP_TOKEN}&cpf={digits}");
    let response = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| LookupError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LookupError::Status(response.status()));
    }

    let body: Option<ApiResponse> = response
        .json()
        .await
        .map_err(|e| LookupError::Decode(e.to_string()))?;

    body.ok_or(LookupError::NoData)?.into_record()
}

#[derive(Clone, Copy)]
struct FunnelContext {
    shell: RwSignal<Shell>,
    panel: RwSignal<Panel>,
    /// Tracking fragment captured once at load; outbound links reuse it so a
    /// mutated location can never leak into them.
    tracking: StoredValue<String>,
    /// Monotonic submission counter. A lookup response whose generation no
    /// longer matches is stale and must not touch the panel or storage.
    lookup_generation: StoredValue<u64>,
    cpf_input: NodeRef<html::Input>,
}

/// Runs the fade-out, waits for the CSS transition to finish and only then
/// swaps which view is in layout. A second call before the delay elapses
/// simply re-targets the pending transition.
fn switch_view(ctx: FunnelContext, target: ShellView) {
    ctx.shell.update(|shell| shell.begin(target));
    spawn_local(async move {
        TimeoutFuture::new(SHELL_SETTLE_MS).await;
        ctx.shell.update(|shell| {
            shell.settle();
        });
        if ctx.shell.get_untracked() == Shell::Settled(ShellView::CpfEntry) {
            if let Some(input) = ctx.cpf_input.get_untracked() {
                let _ = input.focus();
            }
        }
    });
}

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    let query = current_query();

    // A CPF arriving in the URL is persisted right at load time,
    // independent of any form submission.
    if let Some(from_url) = tracking::first_param(&query, "cpf") {
        if cpf::validate(&from_url) {
            storage_set(RAW_CPF_KEY, &cpf::strip(&from_url));
            logging::log!("CPF from URL saved to local storage");
        }
    }

    let ctx = FunnelContext {
        shell: create_rw_signal(Shell::default()),
        panel: create_rw_signal(Panel::Idle),
        tracking: store_value(tracking::extract(&query)),
        lookup_generation: store_value(0u64),
        cpf_input: create_node_ref::<html::Input>(),
    };
    provide_context(ctx);

    view! {
        <Title text="Resgate | Consulte agora o valor disponível no seu CPF"/>
        <main class="min-h-screen bg-slate-950 text-white font-sans overflow-x-hidden">
            <LandingView />
            <CpfEntryView />
        </main>
    }
}

#[component]
fn LandingView() -> impl IntoView {
    let ctx = use_context::<FunnelContext>().expect("funnel context");

    let activate = move |_| {
        navigate(&tracking::append_to(
            ACTIVATE_URL,
            &ctx.tracking.get_value(),
        ));
    };
    let simulate = move |_| {
        navigate(&tracking::append_to(
            SIMULATE_URL,
            &ctx.tracking.get_value(),
        ));
    };
    let open_cpf_page = move |_| switch_view(ctx, ShellView::CpfEntry);

    view! {
        <section
            id="mainPage"
            class="page flex flex-col items-center gap-12 px-6 py-16 md:py-24 max-w-5xl mx-auto"
            class:hidden=move || !ctx.shell.get().is_visible(ShellView::Landing)
            class:fade-out=move || ctx.shell.get().is_fading_out(ShellView::Landing)
        >
            <header class="flex flex-col items-center text-center gap-6">
                <span class="text-xs uppercase tracking-[0.35em] text-emerald-400 font-bold">"Resgate liberado 2025"</span>
                <h1 class="text-4xl md:text-6xl font-black tracking-tighter leading-none">
                    "Você pode ter um " <span class="text-emerald-400">"saldo esquecido"</span> " esperando pelo seu CPF"
                </h1>
                <p class="text-white/70 text-lg md:text-xl max-w-2xl">
                    "Milhões de brasileiros ainda não resgataram valores em seu nome. A consulta é gratuita e leva menos de um minuto."
                </p>
            </header>

            <div class="flex flex-col sm:flex-row gap-4 w-full max-w-xl">
                <button
                    id="btnAtivar"
                    class="flex-1 bg-emerald-500 hover:bg-emerald-400 text-slate-950 font-black text-lg rounded-2xl px-8 py-5 transition-all hover:scale-[1.02] active:scale-[0.98] shadow-xl"
                    on:click=activate
                >
                    "Ativar meu resgate"
                </button>
                <button
                    id="btnSimular"
                    class="flex-1 border border-white/20 hover:border-emerald-400 rounded-2xl px-8 py-5 font-bold text-lg transition-all"
                    on:click=simulate
                >
                    "Simular valor"
                </button>
            </div>

            <button
                id="btnConsultar"
                class="text-emerald-400 underline underline-offset-4 hover:text-emerald-300 transition-colors"
                on:click=open_cpf_page
            >
                "Consultar meu CPF agora"
            </button>

            <HeroCarousel />
        </section>
    }
}

#[component]
fn HeroCarousel() -> impl IntoView {
    let state = create_rw_signal(Carousel::new(SLIDES.len()));
    let timer: StoredValue<Option<Interval>> = store_value(None);
    let touch_start_x: StoredValue<i32> = store_value(0);

    // swapping the handle drops (and cancels) the previous interval
    let restart_timer = move || {
        timer.set_value(Some(Interval::new(AUTO_ADVANCE_MS, move || {
            state.update(|c| c.next());
        })));
    };
    let pause_timer = move || timer.set_value(None);

    restart_timer();
    on_cleanup(move || timer.set_value(None));

    let go_prev = move |_| {
        state.update(|c| c.prev());
        restart_timer();
    };
    let go_next = move |_| {
        state.update(|c| c.next());
        restart_timer();
    };

    let on_touch_start = move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.changed_touches().get(0) {
            touch_start_x.set_value(touch.screen_x());
        }
    };
    let on_touch_end = move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.changed_touches().get(0) {
            let delta = f64::from(touch.screen_x() - touch_start_x.get_value());
            if let Some(action) = carousel::swipe(delta) {
                state.update(|c| c.apply_swipe(action));
                restart_timer();
            }
        }
    };

    view! {
        <div
            id="carousel"
            class="carousel relative w-full max-w-3xl select-none"
            on:mouseenter=move |_| pause_timer()
            on:mouseleave=move |_| restart_timer()
            on:touchstart=on_touch_start
            on:touchend=on_touch_end
        >
            <div class="relative overflow-hidden rounded-[2rem] border border-white/10 bg-white/5 min-h-[220px]">
                {SLIDES
                    .iter()
                    .enumerate()
                    .map(|(i, (title, text))| {
                        view! {
                            <div
                                class="carousel-item absolute inset-0 flex flex-col items-center justify-center text-center gap-4 px-10"
                                class:active=move || state.get().index() == i
                            >
                                <h3 class="text-2xl font-black tracking-tight">{*title}</h3>
                                <p class="text-white/60 max-w-md">{*text}</p>
                            </div>
                        }
                    })
                    .collect_view()}

                <button
                    id="prev-btn"
                    class="absolute left-3 top-1/2 -translate-y-1/2 w-10 h-10 rounded-full bg-black/40 hover:bg-black/60 flex items-center justify-center text-xl"
                    on:click=go_prev
                >
                    "‹"
                </button>
                <button
                    id="next-btn"
                    class="absolute right-3 top-1/2 -translate-y-1/2 w-10 h-10 rounded-full bg-black/40 hover:bg-black/60 flex items-center justify-center text-xl"
                    on:click=go_next
                >
                    "›"
                </button>
            </div>

            <div class="flex justify-center gap-2 mt-5">
                {(0..SLIDES.len())
                    .map(|i| {
                        view! {
                            <button
                                class="carousel-indicator w-2.5 h-2.5 rounded-full bg-white/20"
                                class:active=move || state.get().index() == i
                                on:click=move |_| {
                                    state.update(|c| c.goto(i));
                                    restart_timer();
                                }
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="flex items-center justify-center mt-6">
                {(0..SLIDES.len())
                    .map(|i| {
                        let number = view! {
                            <button
                                class="step-number w-9 h-9 rounded-full border border-white/20 flex items-center justify-center text-sm font-bold shrink-0"
                                class:active=move || state.get().step_state(i) == StepState::Active
                                class:completed=move || state.get().step_state(i) == StepState::Completed
                                on:click=move |_| {
                                    state.update(|c| c.goto(i));
                                    restart_timer();
                                }
                            >
                                {(i + 1).to_string()}
                            </button>
                        };
                        let line = (i + 1 < SLIDES.len()).then(|| {
                            view! {
                                <div
                                    class="step-line h-px w-10 md:w-16 bg-white/15"
                                    class:active=move || state.get().line_active(i + 1)
                                ></div>
                            }
                        });
                        view! { {number} {line} }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn CpfEntryView() -> impl IntoView {
    let ctx = use_context::<FunnelContext>().expect("funnel context");

    let (cpf_value, set_cpf_value) = create_signal(String::new());
    let (terms_accepted, set_terms_accepted) = create_signal(false);

    let panel_ref = create_node_ref::<html::Div>();
    let info_ref = create_node_ref::<html::Div>();
    let error_ref = create_node_ref::<html::Div>();

    let back = move |_| switch_view(ctx, ShellView::Landing);

    let on_input = move |ev| {
        set_cpf_value.set(cpf::format(&event_target_value(&ev)));
    };

    let submit = move |_| {
        let raw = cpf_value.get_untracked();
        let digits = cpf::strip(&raw);
        if !cpf::validate(&raw) {
            alert("Por favor, digite um CPF válido (11 dígitos).");
            return;
        }
        if !terms_accepted.get_untracked() {
            alert("Você precisa concordar com os Termos de Uso e Política de Privacidade para continuar.");
            return;
        }

        storage_set(RAW_CPF_KEY, &digits);

        ctx.lookup_generation.update_value(|g| *g += 1);
        let generation = ctx.lookup_generation.get_value();

        ctx.panel.set(Panel::Loading);
        scroll_to(panel_ref);

        spawn_local(async move {
            let result = lookup_cpf(&digits).await;
            if ctx.lookup_generation.get_value() != generation {
                logging::log!("discarding stale lookup response");
                return;
            }
            match result {
                Ok(record) => {
                    persist_record(&record);
                    ctx.panel.set(Panel::Success(record));
                    // let the layout settle before scrolling to the data
                    TimeoutFuture::new(SUCCESS_SCROLL_DELAY_MS).await;
                    scroll_to(info_ref);
                }
                Err(err) => {
                    logging::error!("lookup failed: {err:?}");
                    ctx.panel.set(Panel::Error(err.to_string()));
                    scroll_to(error_ref);
                }
            }
        });
    };

    // "Corrigir" and "Tentar novamente" currently behave the same:
    // the panel goes back to rest and the CPF field regains focus.
    let reset_panel = move |_| {
        ctx.panel.set(Panel::Idle);
        if let Some(input) = ctx.cpf_input.get_untracked() {
            let _ = input.focus();
        }
    };

    let confirm = move |_| {
        let Some(json) = storage_get(USER_RECORD_KEY) else {
            alert("Dados do usuário não encontrados. Por favor, tente novamente.");
            return;
        };
        let record = match decode_record(&json) {
            Ok(record) => record,
            Err(err) => {
                logging::error!("stored record is corrupt: {err}");
                alert("Ocorreu um erro ao processar seus dados. Por favor, tente novamente.");
                return;
            }
        };
        let digits = record.cpf.as_deref().map(cpf::strip).unwrap_or_default();
        if digits.is_empty() {
            alert("CPF não encontrado. Por favor, tente novamente.");
            return;
        }
        let query = tracking::chat_query(&current_query(), &digits);
        navigate(&format!("{CHAT_URL}?{query}"));
    };

    let success_record = move || match ctx.panel.get() {
        Panel::Success(record) => Some(record),
        _ => None,
    };

    view! {
        <section
            id="cpfPage"
            class="page flex flex-col items-center gap-10 px-6 py-16 md:py-24 max-w-3xl mx-auto"
            class:hidden=move || !ctx.shell.get().is_visible(ShellView::CpfEntry)
            class:fade-in=move || ctx.shell.get() == Shell::Settled(ShellView::CpfEntry)
            class:opacity-0=move || ctx.shell.get() != Shell::Settled(ShellView::CpfEntry)
        >
            <button
                id="btnVoltar"
                class="self-start text-white/50 hover:text-white transition-colors"
                on:click=back
            >
                "← Voltar"
            </button>

            <header class="text-center flex flex-col gap-3">
                <h2 class="text-3xl md:text-5xl font-black tracking-tighter">"Consulte seu CPF"</h2>
                <p class="text-white/60">"Informe seu CPF para verificarmos o valor disponível em seu nome."</p>
            </header>

            <div class="w-full flex flex-col gap-5 bg-white/5 border border-white/10 rounded-[2rem] p-8">
                <input
                    id="cpfInputPage"
                    node_ref=ctx.cpf_input
                    type="text"
                    inputmode="numeric"
                    placeholder="000.000.000-00"
                    class="w-full bg-slate-900 border border-white/10 rounded-2xl py-4 px-6 text-xl tracking-widest text-center focus:outline-none focus:border-emerald-400 transition-all"
                    prop:value=cpf_value
                    on:input=on_input
                />

                <label class="flex items-start gap-3 text-sm text-white/60 cursor-pointer">
                    <input
                        id="termsCheck"
                        type="checkbox"
                        class="mt-1 accent-emerald-500"
                        prop:checked=terms_accepted
                        on:change=move |ev| set_terms_accepted.set(event_target_checked(&ev))
                    />
                    <span>
                        "Li e concordo com os " <a href="/termos" class="underline">"Termos de Uso"</a>
                        " e a " <a href="/privacidade" class="underline">"Política de Privacidade"</a> "."
                    </span>
                </label>

                <button
                    id="btnAnalisar"
                    class="bg-emerald-500 hover:bg-emerald-400 text-slate-950 font-black text-lg rounded-2xl px-8 py-4 transition-all active:scale-[0.98]"
                    on:click=submit
                >
                    "Analisar meu CPF"
                </button>
            </div>

            <div
                id="consultaResultado"
                node_ref=panel_ref
                class="w-full flex flex-col gap-6"
                class:hidden=move || !ctx.panel.get().is_revealed()
            >
                <div
                    id="loadingInfo"
                    class="flex flex-col items-center gap-4 py-8"
                    class:hidden=move || ctx.panel.get() != Panel::Loading
                >
                    <div class="spinner w-10 h-10 rounded-full border-4 border-white/10 border-t-emerald-400"></div>
                    <p class="text-white/60">"Consultando seus dados, aguarde..."</p>
                </div>

                <div
                    id="userInfo"
                    node_ref=info_ref
                    class="flex flex-col gap-4 bg-white/5 border border-emerald-400/30 rounded-[2rem] p-8"
                    class:hidden=move || !matches!(ctx.panel.get(), Panel::Success(_))
                >
                    <h3 class="text-xl font-bold text-emerald-400">"Dados encontrados"</h3>
                    <dl class="grid grid-cols-1 md:grid-cols-2 gap-x-8 gap-y-3 text-sm">
                        <div>
                            <dt class="text-white/40 uppercase tracking-widest text-xs">"Nome"</dt>
                            <dd id="nomeUsuario" class="font-bold">
                                {move || success_record().map(|r| r.name_display()).unwrap_or_default()}
                            </dd>
                        </div>
                        <div>
                            <dt class="text-white/40 uppercase tracking-widest text-xs">"Data de nascimento"</dt>
                            <dd id="dataNascimento" class="font-bold">
                                {move || success_record().map(|r| r.birth_date_display()).unwrap_or_default()}
                            </dd>
                        </div>
                        <div>
                            <dt class="text-white/40 uppercase tracking-widest text-xs">"CPF"</dt>
                            <dd id="cpfUsuario" class="font-bold">
                                {move || success_record().map(|r| r.cpf_display()).unwrap_or_default()}
                            </dd>
                        </div>
                        <div>
                            <dt class="text-white/40 uppercase tracking-widest text-xs">"Sexo"</dt>
                            <dd id="sexoUsuario" class="font-bold">
                                {move || success_record().map(|r| r.sex_display()).unwrap_or_default()}
                            </dd>
                        </div>
                        <div class="md:col-span-2">
                            <dt class="text-white/40 uppercase tracking-widest text-xs">"Nome da mãe"</dt>
                            <dd id="nomeMae" class="font-bold">
                                {move || success_record().map(|r| r.mother_name_display()).unwrap_or_default()}
                            </dd>
                        </div>
                    </dl>

                    <div class="flex flex-col sm:flex-row gap-3 mt-2">
                        <button
                            id="btnConfirmar"
                            class="flex-1 bg-emerald-500 hover:bg-emerald-400 text-slate-950 font-black rounded-2xl px-6 py-4 transition-all"
                            on:click=confirm
                        >
                            "São meus dados, continuar"
                        </button>
                        <button
                            id="btnCorrigir"
                            class="flex-1 border border-white/20 hover:border-white/50 rounded-2xl px-6 py-4 font-bold transition-all"
                            on:click=reset_panel
                        >
                            "Corrigir CPF"
                        </button>
                    </div>
                </div>

                <div
                    id="errorInfo"
                    node_ref=error_ref
                    class="flex flex-col items-center gap-4 bg-red-500/10 border border-red-400/30 rounded-[2rem] p-8 text-center"
                    class:hidden=move || !matches!(ctx.panel.get(), Panel::Error(_))
                >
                    <h3 class="text-xl font-bold text-red-400">"Não foi possível concluir a consulta"</h3>
                    <p id="errorMessage" class="text-white/70">
                        {move || match ctx.panel.get() {
                            Panel::Error(message) => message,
                            _ => String::new(),
                        }}
                    </p>
                    <button
                        id="btnTentarNovamente"
                        class="border border-white/20 hover:border-white/50 rounded-2xl px-8 py-3 font-bold transition-all"
                        on:click=reset_panel
                    >
                        "Tentar novamente"
                    </button>
                </div>
            </div>
        </section>
    }
}

fn main() {
    mount_to_body(|| view! { <App /> })
}
